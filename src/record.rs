//! Parsing of the batch output into experiment records.
//!
//! The experiment harness prints one block per run, a `key: value` pair per
//! line, and terminates each block with a line containing `--`:
//!
//! ```text
//! cmd: mpirun -np 16 ./dlb_heat -M 0.75 -i 1000
//! MPIProcs: 16
//! Mode: parBal
//! TotalTime: 12.5
//! --
//! ```

use errors::*;
use regex::Regex;
use std::collections::BTreeMap;
use std::io::BufRead;
use std::str::FromStr;

const DELIMITER: &str = "--";

lazy_static! {
    static ref MULTIPLIER: Regex =
        Regex::new(r"-M\s+(\d+\.\d+|\d+)").expect("multiplier pattern is valid");
}

/// The fields of one experiment run, as raw strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExperimentRecord {
    fields: BTreeMap<String, String>,

    /// 1-based line where the record starts.
    line: usize,
}

impl ExperimentRecord {
    fn starting_at(line: usize) -> Self {
        ExperimentRecord {
            fields: BTreeMap::new(),
            line: line,
        }
    }

    /// Line of the input where the record starts (1-based).
    pub fn line(&self) -> usize {
        self.line
    }

    /// Number of stored fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True for records produced by consecutive or trailing delimiters.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Stores a field, replacing an earlier one with the same key.
    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.fields.insert(key.into(), value.into());
    }

    /// Raw value of a field, if present.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(|v| v.as_str())
    }

    /// Raw value of a field, failing when it is absent.
    pub fn field(&self, field: &str) -> Result<&str> {
        self.get(field)
            .ok_or_else(|| ErrorKind::MissingField(field.to_string(), self.line).into())
    }

    fn parse_field<T: FromStr>(&self, field: &str) -> Result<T> {
        let value = self.field(field)?;
        value
            .parse::<T>()
            .map_err(|_| ErrorKind::InvalidField(field.to_string(), value.to_string()).into())
    }

    /// Number of MPI processes of the run (`MPIProcs`).
    pub fn procs(&self) -> Result<u32> {
        self.parse_field("MPIProcs")
    }

    /// Execution mode of the run (`Mode`).
    pub fn mode(&self) -> Result<&str> {
        self.field("Mode")
    }

    /// Wall time of the whole run in seconds (`TotalTime`).
    pub fn total_time(&self) -> Result<f64> {
        self.parse_field("TotalTime")
    }

    /// Delay multiplier passed to the run with `-M` (found in `cmd`).
    pub fn multiplier(&self) -> Result<f64> {
        extract_multiplier(self.field("cmd")?)
    }
}

/// Finds the `-M <number>` flag in a command line and returns the number.
pub fn extract_multiplier(cmd: &str) -> Result<f64> {
    let caps = MULTIPLIER
        .captures(cmd)
        .ok_or_else(|| Error::from(ErrorKind::MultiplierNotFound(cmd.to_string())))?;
    let value = &caps[1];
    value
        .parse::<f64>()
        .map_err(|_| ErrorKind::InvalidField("cmd".to_string(), value.to_string()).into())
}

/// Splits a line (terminator already stripped) on its first colon. The value
/// loses a trailing `;` delimiter and surrounding whitespace.
fn split_field(line: &str) -> Option<(&str, &str)> {
    let mut parts = line.splitn(2, ':');
    let key = parts.next()?;
    let value = parts.next()?;
    let value = if value.ends_with(';') {
        &value[..value.len() - 1]
    } else {
        value
    };
    Some((key.trim(), value.trim()))
}

/// Reads the whole batch output. Every delimiter line closes the current
/// record; whatever is accumulated at the end of input is kept as the last
/// record, so input ending with a delimiter yields a trailing empty record.
pub fn parse_log<R: BufRead>(reader: R) -> Result<Vec<ExperimentRecord>> {
    let mut parsed = Vec::new();
    let mut current = ExperimentRecord::starting_at(1);

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;

        if line.contains(DELIMITER) {
            trace!("record at line {} closed with {} fields", current.line, current.len());
            parsed.push(current);
            current = ExperimentRecord::starting_at(line_no + 1);
            continue;
        }

        match split_field(&line) {
            Some((key, value)) => current.insert(key, value),
            None => bail!(ErrorKind::MalformedLine(line_no, line.clone())),
        }
    }

    parsed.push(current);
    debug!("parsed {} records", parsed.len());
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BATCH: &str = "cmd: mpirun -np 16 ./heat -M 0.5\n\
                         MPIProcs: 16\n\
                         Mode: par\n\
                         TotalTime: 10.5\n\
                         --\n\
                         cmd: mpirun -np 16 ./heat -M 1\n\
                         MPIProcs: 16\n\
                         Mode: parBal\n\
                         TotalTime: 9.25\n\
                         --\n";

    #[test]
    fn blocks_become_records() {
        let records = parse_log(BATCH.as_bytes()).unwrap();
        // two blocks plus the trailing empty record
        assert_eq!(records.len(), 3);
        assert!(records[2].is_empty());

        let first = &records[0];
        assert_eq!(first.len(), 4);
        assert_eq!(first.procs().unwrap(), 16);
        assert_eq!(first.mode().unwrap(), "par");
        assert_eq!(first.total_time().unwrap(), 10.5);
        assert_eq!(first.multiplier().unwrap(), 0.5);
        assert_eq!(records[1].line(), 6);
    }

    #[test]
    fn unterminated_block_is_kept() {
        let records = parse_log("Mode: par\n--\nMode: parBal\n".as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].mode().unwrap(), "parBal");
    }

    #[test]
    fn value_is_split_on_first_colon_only() {
        let records = parse_log("cmd: env A=b:c ./heat -M 1.5;\n".as_bytes()).unwrap();
        assert_eq!(records[0].get("cmd"), Some("env A=b:c ./heat -M 1.5"));
    }

    #[test]
    fn unknown_fields_are_stored() {
        let records = parse_log("SleepTotal[ms]: 1200\n--\n".as_bytes()).unwrap();
        assert_eq!(records[0].get("SleepTotal[ms]"), Some("1200"));
    }

    #[test]
    fn line_without_colon_is_fatal() {
        let err = parse_log("Mode: par\nbroken line\n".as_bytes()).unwrap_err();
        match *err.kind() {
            ErrorKind::MalformedLine(line, _) => assert_eq!(line, 2),
            ref other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn multiplier_forms() {
        assert_eq!(extract_multiplier("./heat -M 0.75").unwrap(), 0.75);
        assert_eq!(extract_multiplier("./heat -M\t2 -i 10").unwrap(), 2.0);
        assert_eq!(extract_multiplier("-M 1 -M 1.5").unwrap(), 1.0);
    }

    #[test]
    fn multiplier_pattern_is_compiled_once() {
        let first: *const Regex = &*MULTIPLIER;
        for m in &["0.5", "0.75", "1", "1.5"] {
            let cmd = format!("./heat -M {} -i 1000", m);
            assert_eq!(extract_multiplier(&cmd).unwrap(), m.parse::<f64>().unwrap());
        }
        let second: *const Regex = &*MULTIPLIER;
        assert_eq!(first, second);
    }

    #[test]
    fn missing_multiplier_is_fatal() {
        let err = extract_multiplier("./heat -i 1000").unwrap_err();
        match *err.kind() {
            ErrorKind::MultiplierNotFound(_) => {}
            ref other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn missing_and_invalid_fields() {
        let records = parse_log("MPIProcs: many\n".as_bytes()).unwrap();
        assert!(records[0].procs().is_err());
        assert!(records[0].total_time().is_err());
        assert!(records[0].multiplier().is_err());
    }
}
