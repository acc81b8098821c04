//! Timing series keyed by (process count, mode).

use errors::*;
use record::ExperimentRecord;
use setting::Setting;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::io::Write;

/// Identifies one line of the experiment: process count and mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key {
    /// Number of MPI processes.
    pub procs: u32,

    /// Execution mode label.
    pub mode: String,
}

impl Key {
    /// Creates a new `Key`.
    pub fn new<S: Into<String>>(procs: u32, mode: S) -> Self {
        Key {
            procs: procs,
            mode: mode.into(),
        }
    }
}

// Same text as the tuple the summary format was defined with: `(16, 'par')`.
impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, '{}')", self.procs, self.mode)
    }
}

/// One run: elapsed time and the delay percentage it ran with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Total time in seconds.
    pub time: f64,

    /// Delay percentage.
    pub percent: f64,
}

impl Sample {
    /// Creates a new `Sample`.
    pub fn new(time: f64, percent: f64) -> Self {
        Sample {
            time: time,
            percent: percent,
        }
    }
}

/// Formats a float the way the summary files have always been written:
/// shortest round-trip digits, integral values keep one decimal (`12.0`),
/// and magnitudes below 1e-4 or from 1e16 up use a signed two-digit
/// exponent (`1e-05`, `1.5e+16`).
pub fn format_time(t: f64) -> String {
    if t.is_nan() {
        return "nan".to_string();
    }
    if t.is_infinite() {
        return if t > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let sci = format!("{:e}", t);
    let mut parts = sci.splitn(2, 'e');
    let mantissa = parts.next().unwrap_or("0");
    let exponent = parts.next().and_then(|e| e.parse::<i32>().ok()).unwrap_or(0);

    if t != 0.0 && (exponent < -4 || exponent >= 16) {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    } else if t.fract() == 0.0 {
        format!("{:.1}", t)
    } else {
        format!("{}", t)
    }
}

fn format_list(values: &[f64]) -> String {
    let inner = values.iter().map(|&v| format_time(v)).collect::<Vec<_>>();
    format!("[{}]", inner.join(", "))
}

/// All samples of a batch, grouped by the predeclared keys.
#[derive(Debug, Clone)]
pub struct TimingSeries {
    keys: Vec<Key>,
    series: HashMap<Key, Vec<Sample>>,
}

impl TimingSeries {
    /// Creates empty series for the given keys; their order is kept.
    pub fn new(keys: Vec<Key>) -> Self {
        let series = keys.iter()
            .map(|k| (k.clone(), Vec::new()))
            .collect::<HashMap<Key, Vec<Sample>>>();
        TimingSeries {
            keys: keys,
            series: series,
        }
    }

    /// Creates empty series for every key of the experiment design.
    pub fn from_setting(setting: &Setting) -> Self {
        let keys = setting
            .keys()
            .into_iter()
            .map(|(procs, mode)| Key::new(procs, mode))
            .collect::<Vec<_>>();
        TimingSeries::new(keys)
    }

    /// Groups parsed records by key and sorts every series by percentage.
    /// Records outside the design abort the aggregation.
    pub fn aggregate(records: &[ExperimentRecord], setting: &Setting) -> Result<Self> {
        let mut times = TimingSeries::from_setting(setting);

        for record in records {
            if record.is_empty() {
                trace!("skipping empty record at line {}", record.line());
                continue;
            }

            let key = Key::new(record.procs()?, record.mode()?);
            let time = record.total_time()?;
            let percent = record.multiplier()? * setting.percent_scale;
            debug!("{} at {}%: {}s", key, percent, time);
            times.push(key, Sample::new(time, percent))?;
        }

        times.sort();
        Ok(times)
    }

    /// Appends a sample to the series of `key`.
    pub fn push(&mut self, key: Key, sample: Sample) -> Result<()> {
        match self.series.get_mut(&key) {
            Some(series) => {
                series.push(sample);
                Ok(())
            }
            None => bail!(ErrorKind::UnexpectedKey(key.procs, key.mode)),
        }
    }

    /// Sorts every series by percentage ascending. The sort is stable, runs
    /// with the same percentage keep their input order.
    pub fn sort(&mut self) {
        for series in self.series.values_mut() {
            series.sort_by(|a, b| {
                a.percent.partial_cmp(&b.percent).unwrap_or(Ordering::Equal)
            });
        }
    }

    /// The predeclared keys in design order.
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Samples of `key`, if it belongs to the design.
    pub fn get(&self, key: &Key) -> Option<&[Sample]> {
        self.series.get(key).map(|s| s.as_slice())
    }

    /// Elapsed times of `key` in series order.
    pub fn times(&self, key: &Key) -> Option<Vec<f64>> {
        self.get(key).map(|s| s.iter().map(|i| i.time).collect())
    }

    /// Keys ordered by process count; the design order is kept for equal
    /// counts.
    pub fn keys_by_procs(&self) -> Vec<&Key> {
        let mut keys = self.keys.iter().collect::<Vec<_>>();
        keys.sort_by_key(|k| k.procs);
        keys
    }

    /// One summary line: `(16, 'par'):10.5;9.0`.
    pub fn summary_line(&self, key: &Key) -> String {
        let times = self.times(key)
            .unwrap_or_default()
            .into_iter()
            .map(format_time)
            .collect::<Vec<_>>();
        format!("{}:{}", key, times.join(";"))
    }

    /// Writes the summary, one line per predeclared key in design order.
    pub fn write_summary<W: Write>(&self, out: &mut W) -> Result<()> {
        for key in &self.keys {
            writeln!(out, "{}", self.summary_line(key))?;
        }
        out.flush()?;
        Ok(())
    }

    /// Logs every series with its percentages.
    pub fn dump(&self) {
        for key in &self.keys {
            let samples = self.get(key).unwrap_or(&[]);
            let pairs = samples
                .iter()
                .map(|s| format!("({}, {})", format_time(s.time), format_time(s.percent)))
                .collect::<Vec<_>>();
            info!("{}:[{}]", key, pairs.join(", "));
        }
    }

    /// How much time balancing saved for every process count of the design.
    ///
    /// The plain and the balanced series are compared index by index; they
    /// are assumed to hold the same multipliers in the same order. Only the
    /// lengths are checked.
    pub fn percent_saved(&self, setting: &Setting) -> Result<Vec<Saving>> {
        let mut savings = Vec::with_capacity(setting.cores.len());

        for &procs in &setting.cores {
            let plain = self.times_or_fail(Key::new(procs, setting.plain_mode.as_str()))?;
            let balanced = self.times_or_fail(Key::new(procs, setting.balanced_mode.as_str()))?;
            if plain.len() != balanced.len() {
                bail!(ErrorKind::MisalignedSeries(procs, plain.len(), balanced.len()));
            }

            let diff = plain
                .iter()
                .zip(balanced.iter())
                .map(|(p, b)| p - b)
                .collect::<Vec<_>>();
            let percent = plain
                .iter()
                .zip(diff.iter())
                .map(|(p, d)| d / p * 100.0)
                .collect::<Vec<_>>();

            savings.push(Saving {
                procs: procs,
                plain: plain,
                balanced: balanced,
                diff: diff,
                percent: percent,
            });
        }

        Ok(savings)
    }

    fn times_or_fail(&self, key: Key) -> Result<Vec<f64>> {
        match self.times(&key) {
            Some(t) => Ok(t),
            None => bail!(ErrorKind::UnexpectedKey(key.procs, key.mode)),
        }
    }
}

/// Time saved by balancing at one process count.
#[derive(Debug, Clone, PartialEq)]
pub struct Saving {
    /// Process count.
    pub procs: u32,

    /// Times of the plain runs.
    pub plain: Vec<f64>,

    /// Times of the balanced runs.
    pub balanced: Vec<f64>,

    /// `plain - balanced` per index.
    pub diff: Vec<f64>,

    /// `diff / plain` in percent per index.
    pub percent: Vec<f64>,
}

impl fmt::Display for Saving {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.procs)?;
        writeln!(f, "{}", format_list(&self.plain))?;
        writeln!(f, "{}", format_list(&self.balanced))?;
        write!(f, "{}", format_list(&self.diff))?;
        for p in &self.percent {
            write!(f, "\n{}", format_time(*p))?;
        }
        Ok(())
    }
}
