use serde::{Deserialize, Deserializer, Serialize};

/// How a monitored repository gets promoted: rolling refresh of every
/// matching scaling group, or scale-from-zero bootstrap of the designated
/// deploy group.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub enum DeployMode {
    #[serde(rename = "ASG")]
    Asg,
    #[serde(rename = "IaC")]
    Iac,
}

// Anything that is not literally "ASG" falls back to IaC, mirroring the
// dispatcher contract of "ASG or otherwise".
impl<'de> Deserialize<'de> for DeployMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(match value.as_str() {
            "ASG" => DeployMode::Asg,
            _ => DeployMode::Iac,
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MonitorItem {
    #[serde(rename = "dockerRepo")]
    pub docker_repo: String,
    pub mode: DeployMode,
}

/// Shape of the externally managed configuration document.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MonitorConfig {
    pub monitor: Vec<MonitorItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mode_asg() {
        let item: MonitorItem =
            serde_json::from_str(r#"{"dockerRepo": "team-api", "mode": "ASG"}"#).unwrap();
        assert_eq!(item.mode, DeployMode::Asg);
    }

    #[test]
    fn test_unknown_mode_falls_back_to_iac() {
        let item: MonitorItem =
            serde_json::from_str(r#"{"dockerRepo": "team-api", "mode": "whatever"}"#).unwrap();
        assert_eq!(item.mode, DeployMode::Iac);
    }

    #[test]
    fn test_config_document_shape() {
        let config: MonitorConfig = serde_json::from_str(
            r#"{"monitor": [
                {"dockerRepo": "team-api", "mode": "ASG"},
                {"dockerRepo": "team-site", "mode": "IaC"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(config.monitor.len(), 2);
        assert_eq!(config.monitor[1].mode, DeployMode::Iac);
    }
}
