use std::fs::OpenOptions;
use std::path::Path;

use serde::Serialize;

/// One row of the `--stats-csv` file.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub target: String,
    pub query: String,
    pub delta: String,
    pub directed: bool,
    pub occurrences: u64,
    pub cancelled: bool,
    pub read_secs: f64,
    pub match_secs: f64,
}

impl RunStats {
    /// Append this row to `path`, writing the header first if the file is new
    /// or empty.
    pub fn append_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let needs_header = file.metadata()?.len() == 0;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer.serialize(self)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(occurrences: u64) -> RunStats {
        RunStats {
            target: "g.txt".into(),
            query: "q.txt".into(),
            delta: "inf".into(),
            directed: true,
            occurrences,
            cancelled: false,
            read_secs: 0.5,
            match_secs: 1.25,
        }
    }

    #[test]
    fn header_is_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.csv");
        row(3).append_to(&path).unwrap();
        row(7).append_to(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "target,query,delta,directed,occurrences,cancelled,read_secs,match_secs",
                "g.txt,q.txt,inf,true,3,false,0.5,1.25",
                "g.txt,q.txt,inf,true,7,false,0.5,1.25",
            ]
        );
    }
}
