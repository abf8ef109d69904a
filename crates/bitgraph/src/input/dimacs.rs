use std::fs::File;
use std::path::Path;

use linereader::LineReader;
use log::warn;

use super::fields;
use crate::graph::Graph;
use crate::Error;

/// Reads a DIMACS clique-format file.
///
/// Comment lines start with `c`, the header is `p edge N M`, and each of the
/// following edge lines is `e u v` with 1-based vertex ids. Edges are
/// symmetrised; self-loops are ignored; a repeated edge is an error, as is an
/// edge before the header or one that mentions an out-of-range vertex.
pub fn read_dimacs<P: AsRef<Path>>(path: P) -> Result<Graph, Error> {
    let path = path.as_ref();
    let file = path.display().to_string();
    let fail = |message: String| Error::InvalidDimacs {
        file: file.clone(),
        message,
    };

    let mut reader = LineReader::new(File::open(path)?);
    let mut graph: Option<Graph> = None;
    let mut claimed_edges = 0usize;
    let mut seen_edges = 0usize;
    let mut line_number = 0usize;

    while let Some(line) = reader.next_line() {
        let line = line?;
        line_number += 1;
        let mut parts = fields(line);

        match parts.next() {
            None => continue,
            Some(b"c") => continue,
            Some(b"p") => {
                if graph.is_some() {
                    return Err(fail(format!("line {line_number}: duplicate problem line")));
                }
                if parts.next() != Some(b"edge".as_slice()) {
                    return Err(fail(format!(
                        "line {line_number}: expected problem type 'edge'"
                    )));
                }
                let n: usize = parts
                    .next()
                    .and_then(atoi::atoi)
                    .ok_or_else(|| fail(format!("line {line_number}: bad vertex count")))?;
                claimed_edges = parts
                    .next()
                    .and_then(atoi::atoi)
                    .ok_or_else(|| fail(format!("line {line_number}: bad edge count")))?;

                let mut g = Graph::new(n);
                g.set_vertex_names((1..=n).map(|v| v.to_string()).collect());
                graph = Some(g);
            }
            Some(b"e") => {
                let graph = graph
                    .as_mut()
                    .ok_or_else(|| fail(format!("line {line_number}: edge before problem line")))?;
                let u: usize = parts
                    .next()
                    .and_then(atoi::atoi)
                    .ok_or_else(|| fail(format!("line {line_number}: bad edge endpoint")))?;
                let v: usize = parts
                    .next()
                    .and_then(atoi::atoi)
                    .ok_or_else(|| fail(format!("line {line_number}: bad edge endpoint")))?;

                if u < 1 || v < 1 || u > graph.size() || v > graph.size() {
                    return Err(fail(format!(
                        "line {line_number}: edge ({u}, {v}) out of range"
                    )));
                }
                if u == v {
                    continue;
                }
                if graph.adjacent(u - 1, v - 1) {
                    return Err(fail(format!(
                        "line {line_number}: duplicate edge ({u}, {v})"
                    )));
                }
                graph.add_edge(u - 1, v - 1);
                seen_edges += 1;
            }
            Some(other) => {
                return Err(fail(format!(
                    "line {line_number}: unexpected '{}'",
                    String::from_utf8_lossy(other)
                )));
            }
        }
    }

    let graph = graph.ok_or_else(|| fail("missing problem line".to_string()))?;
    if seen_edges != claimed_edges {
        // plenty of published instances get this wrong, so it is not fatal
        warn!("{file}: header claims {claimed_edges} edges, found {seen_edges}");
    }
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn reads_a_triangle() {
        let f = write_temp("c a triangle\np edge 3 3\ne 1 2\ne 2 3\ne 1 3\n");
        let graph = read_dimacs(f.path()).unwrap();
        assert_eq!(graph.size(), 3);
        assert!(graph.adjacent(0, 1) && graph.adjacent(1, 2) && graph.adjacent(0, 2));
        assert_eq!(graph.vertex_name(0), "1");
    }

    #[test]
    fn self_loops_are_ignored() {
        let f = write_temp("p edge 2 2\ne 1 1\ne 1 2\n");
        let graph = read_dimacs(f.path()).unwrap();
        assert!(!graph.adjacent(0, 0));
        assert!(graph.adjacent(0, 1));
    }

    #[test]
    fn duplicate_edge_fails() {
        let f = write_temp("p edge 2 2\ne 1 2\ne 2 1\n");
        assert!(matches!(
            read_dimacs(f.path()),
            Err(Error::InvalidDimacs { .. })
        ));
    }

    #[test]
    fn out_of_range_fails() {
        let f = write_temp("p edge 2 1\ne 1 3\n");
        assert!(matches!(
            read_dimacs(f.path()),
            Err(Error::InvalidDimacs { .. })
        ));
    }

    #[test]
    fn edge_before_header_fails() {
        let f = write_temp("e 1 2\np edge 2 1\n");
        assert!(matches!(
            read_dimacs(f.path()),
            Err(Error::InvalidDimacs { .. })
        ));
    }
}
