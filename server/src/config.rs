use serde::Deserialize;
use std::path::PathBuf;

/// Location and layout of the backing CSV file.
#[derive(Clone, Debug, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_data_file")]
    pub data_file: String,
    #[serde(default = "default_timestamp_column")]
    pub timestamp_column: String,
    #[serde(default = "default_wind_column")]
    pub wind_column: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("static/data")
}

fn default_data_file() -> String {
    "Energy_Data_20200920_20240118.csv".to_string()
}

fn default_timestamp_column() -> String {
    "dtm".to_string()
}

fn default_wind_column() -> String {
    "Wind_MW".to_string()
}

impl Default for DatasetConfig {
    fn default() -> Self {
        DatasetConfig {
            data_dir: default_data_dir(),
            data_file: default_data_file(),
            timestamp_column: default_timestamp_column(),
            wind_column: default_wind_column(),
        }
    }
}

impl DatasetConfig {
    /// Reads `RENEWCAST_DATA_DIR`, `RENEWCAST_DATA_FILE`,
    /// `RENEWCAST_TIMESTAMP_COLUMN` and `RENEWCAST_WIND_COLUMN`, falling back
    /// to defaults for unset variables.
    pub fn from_env() -> Result<DatasetConfig, envy::Error> {
        envy::prefixed("RENEWCAST_").from_env::<DatasetConfig>()
    }

    pub fn path(&self) -> PathBuf {
        self.data_dir.join(&self.data_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_to_energy_dataset() {
        let config = DatasetConfig::default();
        assert_eq!(
            config.path(),
            PathBuf::from("static/data/Energy_Data_20200920_20240118.csv")
        );
        assert_eq!(config.timestamp_column, "dtm");
        assert_eq!(config.wind_column, "Wind_MW");
    }

    #[test]
    fn test_from_iter_overrides_and_defaults() {
        let vars = vec![
            ("RENEWCAST_DATA_DIR".to_string(), "/srv/data".to_string()),
            ("RENEWCAST_WIND_COLUMN".to_string(), "wind".to_string()),
        ];
        let config: DatasetConfig = envy::prefixed("RENEWCAST_").from_iter(vars).unwrap();

        assert_eq!(
            config.path(),
            PathBuf::from("/srv/data/Energy_Data_20200920_20240118.csv")
        );
        assert_eq!(config.timestamp_column, "dtm");
        assert_eq!(config.wind_column, "wind");
    }
}
