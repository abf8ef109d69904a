//! The scenario suite: small instances with known answers, run through the
//! public entry points the way the binaries drive them.

use bitgraph::prelude::*;
use graph_solvers::prelude::*;

fn petersen() -> Graph {
    Graph::from_edges(
        10,
        &[
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 4),
            (4, 0),
            (0, 5),
            (1, 6),
            (2, 7),
            (3, 8),
            (4, 9),
            (5, 7),
            (7, 9),
            (9, 6),
            (6, 8),
            (8, 5),
        ],
    )
}

fn k33() -> Graph {
    Graph::from_edges(
        6,
        &[(0, 3), (0, 4), (0, 5), (1, 3), (1, 4), (1, 5), (2, 3), (2, 4), (2, 5)],
    )
}

#[test]
fn p5_scenario() {
    let p5 = Graph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]);

    for (name, algorithm) in MAX_CLIQUE_ALGORITHMS {
        let result = algorithm(&p5, &MaxCliqueParams::default()).unwrap();
        assert_eq!(result.size, 2, "{name}");
        let members: Vec<usize> = result.members.iter().copied().collect();
        assert!(is_clique(&p5, &members), "{name}");
    }

    for (name, algorithm) in MAX_BICLIQUE_ALGORITHMS {
        let result = algorithm(&p5, &MaxBicliqueParams::default()).unwrap();
        assert_eq!(result.size, 1, "{name}");
    }
}

#[test]
fn k33_scenario() {
    let graph = k33();

    for (name, algorithm) in MAX_CLIQUE_ALGORITHMS {
        let result = algorithm(&graph, &MaxCliqueParams::default()).unwrap();
        assert_eq!(result.size, 2, "{name}");
    }

    for (name, algorithm) in MAX_BICLIQUE_ALGORITHMS {
        let result = algorithm(&graph, &MaxBicliqueParams::default()).unwrap();
        assert_eq!(result.size, 3, "{name}");
        let mut sides = [
            result.members_a.iter().copied().collect::<Vec<_>>(),
            result.members_b.iter().copied().collect::<Vec<_>>(),
        ];
        sides.sort();
        assert_eq!(sides[0], [0, 1, 2], "{name}");
        assert_eq!(sides[1], [3, 4, 5], "{name}");
    }
}

#[test]
fn petersen_scenario() {
    let graph = petersen();

    for (name, algorithm) in MAX_CLIQUE_ALGORITHMS {
        let result = algorithm(&graph, &MaxCliqueParams::default()).unwrap();
        assert_eq!(result.size, 2, "{name}");
    }

    let params = MaxCliqueParams {
        enumerate: true,
        initial_bound: 1,
        ..MaxCliqueParams::default()
    };
    let result = cco_max_clique(&graph, &params, CcoConfig::default()).unwrap();
    assert_eq!(result.size, 2);
    assert_eq!(result.result_count, 15);
}

#[test]
fn c4_into_k33_scenario() {
    let c4 = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
    let target = k33();

    for (name, algorithm) in SUBGRAPH_ISOMORPHISM_ALGORITHMS {
        let result = algorithm((&c4, &target), &SubgraphIsomorphismParams::default()).unwrap();
        let map = &result.isomorphism;
        assert_eq!(map.len(), 4, "{name}");
        for i in 0..4 {
            assert!(
                target.adjacent(map[&i], map[&((i + 1) % 4)]),
                "{name}: cycle edge {i} broken"
            );
        }
    }
}

#[test]
fn abort_before_first_node_scenario() {
    let graph = petersen();

    for (name, algorithm) in MAX_CLIQUE_ALGORITHMS {
        let params = MaxCliqueParams {
            initial_bound: 1,
            ..MaxCliqueParams::default()
        };
        params
            .abort
            .store(true, std::sync::atomic::Ordering::SeqCst);
        let result = algorithm(&graph, &params).unwrap();
        assert_eq!(result.size, 1, "{name}");
        assert!(result.members.is_empty(), "{name}");
        assert!(result.aborted, "{name}");
    }
}

#[test]
fn complement_and_power_round_trips() {
    let graph = gnp(20, 0.4, 900);
    let back = complement(&complement(&graph));
    for u in 0..20 {
        for v in 0..20 {
            assert_eq!(graph.adjacent(u, v), back.adjacent(u, v));
        }
    }
    let p1 = power(&graph, 1);
    for u in 0..20 {
        for v in 0..20 {
            assert_eq!(graph.adjacent(u, v), p1.adjacent(u, v));
        }
    }
}

#[test]
fn independent_set_via_complement() {
    // the max clique of the complement is the max independent set
    let graph = Graph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]);
    let result =
        cco_max_clique(&complement(&graph), &MaxCliqueParams::default(), CcoConfig::default())
            .unwrap();
    assert_eq!(result.size, 3);
}

#[test]
fn deterministic_reruns() {
    let graph = gnp(24, 0.5, 901);
    let first = cco_max_clique(&graph, &MaxCliqueParams::default(), CcoConfig::default()).unwrap();
    let second = cco_max_clique(&graph, &MaxCliqueParams::default(), CcoConfig::default()).unwrap();
    assert_eq!(first.size, second.size);
    assert_eq!(first.nodes, second.nodes);
    assert_eq!(first.members, second.members);

    let threaded = tcco_max_clique(&graph, &MaxCliqueParams::default(), CcoConfig::default())
        .unwrap();
    assert_eq!(threaded.size, first.size);
}

#[test]
fn labelled_clique_scenarios() {
    let graph = gnp(20, 0.5, 902);
    let labels: Vec<u8> = (0..20).map(|v| (v % 3) as u8).collect();
    for (name, algorithm) in MAX_LABELLED_CLIQUE_ALGORITHMS {
        let result = algorithm(&graph, &MaxLabelledCliqueParams::new(labels.clone())).unwrap();
        let members: Vec<usize> = result.members.iter().copied().collect();
        assert!(is_clique(&graph, &members), "{name}");
        assert_eq!(members.len() as u32, result.size, "{name}");
        let distinct: std::collections::BTreeSet<u8> =
            members.iter().map(|&v| labels[v]).collect();
        assert_eq!(distinct.len() as u32, result.cost, "{name}");
    }
}
