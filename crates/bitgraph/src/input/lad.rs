use std::fs::File;
use std::path::Path;

use linereader::LineReader;

use super::fields;
use crate::graph::Graph;
use crate::Error;

/// Reads a LAD-format file: a vertex count on the first line, then one line
/// per vertex giving its degree followed by that many 0-based neighbour ids.
///
/// Both endpoints usually list an edge; [`Graph::add_edge`] is idempotent so
/// that is fine. Out-of-range neighbours and degree mismatches are errors.
pub fn read_lad<P: AsRef<Path>>(path: P) -> Result<Graph, Error> {
    let path = path.as_ref();
    let file = path.display().to_string();
    let fail = |message: String| Error::InvalidLad {
        file: file.clone(),
        message,
    };

    let mut reader = LineReader::new(File::open(path)?);

    let n: usize = match reader.next_line() {
        Some(line) => fields(line?)
            .next()
            .and_then(atoi::atoi)
            .ok_or_else(|| fail("bad vertex count".to_string()))?,
        None => return Err(fail("empty file".to_string())),
    };

    let mut graph = Graph::new(n);

    for v in 0..n {
        let line = match reader.next_line() {
            Some(line) => line?,
            None => return Err(fail(format!("missing adjacency line for vertex {v}"))),
        };
        let mut parts = fields(line);
        let degree: usize = parts
            .next()
            .and_then(atoi::atoi)
            .ok_or_else(|| fail(format!("vertex {v}: bad degree")))?;

        let mut listed = 0usize;
        for part in parts {
            let u: usize = atoi::atoi(part)
                .ok_or_else(|| fail(format!("vertex {v}: bad neighbour id")))?;
            if u >= n {
                return Err(fail(format!("vertex {v}: neighbour {u} out of range")));
            }
            graph.add_edge(v, u);
            listed += 1;
        }
        if listed != degree {
            return Err(fail(format!(
                "vertex {v}: degree {degree} does not match {listed} listed neighbours"
            )));
        }
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
    fn reads_a_path() {
        let f = write_temp("3\n1 1\n2 0 2\n1 1\n");
        let graph = read_lad(f.path()).unwrap();
        assert_eq!(graph.size(), 3);
        assert!(graph.adjacent(0, 1) && graph.adjacent(1, 2));
        assert!(!graph.adjacent(0, 2));
    }

    #[test]
    fn degree_mismatch_fails() {
        let f = write_temp("2\n2 1\n1 0\n");
        assert!(matches!(read_lad(f.path()), Err(Error::InvalidLad { .. })));
    }

    #[test]
    fn out_of_range_neighbour_fails() {
        let f = write_temp("2\n1 5\n0\n");
        assert!(matches!(read_lad(f.path()), Err(Error::InvalidLad { .. })));
    }

    #[test]
    fn truncated_file_fails() {
        let f = write_temp("3\n1 1\n");
        assert!(matches!(read_lad(f.path()), Err(Error::InvalidLad { .. })));
    }
}
