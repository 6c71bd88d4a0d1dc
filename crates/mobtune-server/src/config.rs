use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    pub server: ServerSection,
    pub logging: LoggingSection,
    #[serde(default)]
    pub tuning: TuningSection,
    #[serde(default)]
    pub packs: PacksSection,
    #[serde(default)]
    pub cleanup: CleanupSection,
    #[serde(default)]
    pub maintenance: MaintenanceSection,
}

#[derive(Debug, Deserialize)]
pub struct ServerSection {
    /// Session name, used as the key in the session registry.
    pub name: String,
    /// Mob types spawned at startup (soak-test population).
    #[serde(default)]
    pub seed_mobs: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct TuningSection {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Goal kinds removed from every mob, including registered subtypes.
    #[serde(default)]
    pub remove_goals: Vec<String>,
    /// Goal kinds shielded from removal rules.
    #[serde(default)]
    pub protect_goals: Vec<String>,
    /// Type-name fragments removed (fallback for unregistered goals).
    #[serde(default)]
    pub remove_goal_names: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl Default for TuningSection {
    fn default() -> Self {
        Self {
            enabled: true,
            remove_goals: Vec::new(),
            protect_goals: Vec::new(),
            remove_goal_names: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PacksSection {
    #[serde(default = "default_packs_directory")]
    pub directory: String,
}

fn default_packs_directory() -> String {
    "packs".into()
}

impl Default for PacksSection {
    fn default() -> Self {
        Self {
            directory: default_packs_directory(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CleanupSection {
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval: u64,
    #[serde(default = "default_expiry_jitter")]
    pub expiry_jitter: f32,
}

fn default_sweep_interval() -> u64 {
    100
}

fn default_expiry_jitter() -> f32 {
    0.1
}

impl Default for CleanupSection {
    fn default() -> Self {
        Self {
            sweep_interval: default_sweep_interval(),
            expiry_jitter: default_expiry_jitter(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MaintenanceSection {
    #[serde(default = "default_maintenance_interval")]
    pub interval: u64,
}

fn default_maintenance_interval() -> u64 {
    600
}

impl Default for MaintenanceSection {
    fn default() -> Self {
        Self {
            interval: default_maintenance_interval(),
        }
    }
}

impl ServerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }
}
