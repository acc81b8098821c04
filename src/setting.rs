//! Experiment design and chart labels in TOML.
//!
//! Without a setting file the built-in design of the balancing sweep is used:
//! four core counts, the plain and the balanced mode, and the delay
//! multipliers mapped to percent with a scale of 25.

use errors::*;
use itertools::Itertools;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use toml;

/// The experiment setting.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Setting {
    /// Process counts the batch was run with.
    pub cores: Vec<u32>,

    /// Modes every process count was run in.
    pub modes: Vec<String>,

    /// The unbalanced mode label.
    pub plain_mode: String,

    /// The load-balanced mode label.
    pub balanced_mode: String,

    /// Converts a delay multiplier to percent of delay.
    pub percent_scale: f64,

    /// Chart labels and geometry.
    pub chart: ChartSetting,
}

/// Labels and geometry of the comparison chart.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ChartSetting {
    /// Chart caption.
    pub title: String,

    /// Description of the x axis (delay percentage).
    pub x_label: String,

    /// Description of the y axis (elapsed time).
    pub y_label: String,

    /// Appended to the process count in the legend of balanced lines.
    pub balanced_suffix: String,

    /// Appended to the process count in the legend of plain lines.
    pub plain_suffix: String,

    /// Font family for every text on the chart.
    pub font: String,

    /// Width of the plot area in pixels (legend panel excluded).
    pub width: u32,

    /// Height of the chart in pixels.
    pub height: u32,
}

impl Default for Setting {
    fn default() -> Self {
        Setting {
            cores: vec![16, 64, 128, 256],
            modes: vec!["par".to_string(), "parBal".to_string()],
            plain_mode: "par".to_string(),
            balanced_mode: "parBal".to_string(),
            percent_scale: 25.0,
            chart: ChartSetting::default(),
        }
    }
}

impl Default for ChartSetting {
    fn default() -> Self {
        ChartSetting {
            title: "Délka výpočtu s/bez vyvážení".to_string(),
            x_label: "Podíl zpoždění [%]".to_string(),
            y_label: "Délka výpočtu [s]".to_string(),
            balanced_suffix: " s vyv.".to_string(),
            plain_suffix: " bez vyv.".to_string(),
            font: "DejaVu Sans".to_string(),
            // 6.4 x 4.8 in at 300 DPI
            width: 1920,
            height: 1440,
        }
    }
}

impl Setting {
    /// Initialize from a file.
    pub fn init<P: AsRef<Path>>(path: P) -> Result<Setting> {
        let path = path.as_ref();
        let mut file = File::open(path)
            .chain_err(|| format!("no setting file {}", path.display()))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Setting::from_toml(&contents)
    }

    /// Parses a setting from TOML text. Missing fields keep their default.
    pub fn from_toml(contents: &str) -> Result<Setting> {
        let setting: Setting = toml::from_str(contents)?;
        if setting.cores.is_empty() || setting.modes.is_empty() {
            bail!(ErrorKind::InvalidArgument(
                "setting needs at least one core count and one mode".to_string(),
            ));
        }
        if setting.cores.iter().unique().count() != setting.cores.len() {
            bail!(ErrorKind::InvalidArgument(format!(
                "duplicate core counts in {:?}",
                setting.cores
            )));
        }
        if setting.modes.iter().unique().count() != setting.modes.len() {
            bail!(ErrorKind::InvalidArgument(format!(
                "duplicate modes in {:?}",
                setting.modes
            )));
        }
        Ok(setting)
    }

    /// Returns all (process count, mode) pairs of the design, core-count major.
    pub fn keys(&self) -> Vec<(u32, String)> {
        iproduct!(self.cores.iter(), self.modes.iter())
            .map(|(&c, m)| (c, m.clone()))
            .collect::<Vec<_>>()
    }

    /// Whether `mode` is the load-balanced variant.
    pub fn is_balanced(&self, mode: &str) -> bool {
        mode == self.balanced_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keys_are_core_major() {
        let keys = Setting::default().keys();
        assert_eq!(keys.len(), 8);
        assert_eq!(keys[0], (16, "par".to_string()));
        assert_eq!(keys[1], (16, "parBal".to_string()));
        assert_eq!(keys[7], (256, "parBal".to_string()));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let setting = Setting::from_toml("cores = [4, 8]\n[chart]\ntitle = \"t\"\n").unwrap();
        assert_eq!(setting.cores, vec![4, 8]);
        assert_eq!(setting.modes, Setting::default().modes);
        assert_eq!(setting.percent_scale, 25.0);
        assert_eq!(setting.chart.title, "t");
        assert_eq!(setting.chart.width, 1920);
    }

    #[test]
    fn shipped_setting_matches_defaults() {
        let setting = Setting::from_toml(include_str!("../Setting.toml")).unwrap();
        assert_eq!(setting, Setting::default());
    }

    #[test]
    fn empty_design_is_rejected() {
        assert!(Setting::from_toml("cores = []").is_err());
    }

    #[test]
    fn duplicate_design_entries_are_rejected() {
        for text in &["cores = [16, 64, 16]", "modes = [\"par\", \"parBal\", \"par\"]"] {
            match *Setting::from_toml(text).unwrap_err().kind() {
                ErrorKind::InvalidArgument(_) => {}
                ref other => panic!("unexpected error {:?}", other),
            }
        }
    }

    #[test]
    fn missing_file_fails() {
        assert!(Setting::init("/nonexistent/setting.toml").is_err());
    }
}
