//! 服务端配置
//!
//! JSON 配置文件，查找顺序：`$TICTACTOE_CONFIG`，然后是 `<config_dir>/tictactoe/server.json`。
//! 文件不存在或格式无效时使用默认配置。

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use protocol::{StrategyKind, DEFAULT_PORT};
use serde::{Deserialize, Serialize};
use tictactoe_ai::{AiConfig, TieBreak};

/// 指定配置文件路径的环境变量
pub const CONFIG_ENV: &str = "TICTACTOE_CONFIG";

/// 服务端配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 监听地址
    pub host: String,
    /// 监听端口
    pub port: u16,
    /// Minimax 同分走法的取舍
    pub tie_break: TieBreak,
    /// 电脑回应前的等待时间（毫秒）
    pub computer_delay_ms: u64,
    /// 日志过滤规则（`RUST_LOG` 优先）
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            tie_break: TieBreak::First,
            computer_delay_ms: 0,
            log_filter: "tictactoe_server=info".to_string(),
        }
    }
}

impl ServerConfig {
    /// 配置文件路径
    pub fn settings_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|mut path| {
            path.push("tictactoe");
            path.push("server.json");
            path
        })
    }

    /// 加载配置，失败时回退到默认配置
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            tracing::warn!("无法获取配置目录，使用默认配置");
            return Self::default();
        };

        if !path.exists() {
            tracing::info!("配置文件不存在: {:?}，使用默认配置", path);
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("已加载配置: {:?}", path);
                config
            }
            Err(e) => {
                tracing::warn!("{:#}，使用默认配置", e);
                Self::default()
            }
        }
    }

    /// 从指定文件加载
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取配置文件 {:?}", path))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("配置文件格式无效 {:?}", path))?;
        Ok(config)
    }

    /// 保存到指定文件
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("无法创建配置目录 {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self).context("序列化配置失败")?;
        std::fs::write(path, content).with_context(|| format!("写入配置文件失败 {:?}", path))?;

        tracing::info!("配置已保存: {:?}", path);
        Ok(())
    }

    /// 监听地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 电脑回应前的等待时间
    pub fn computer_delay(&self) -> Duration {
        Duration::from_millis(self.computer_delay_ms)
    }

    /// 指定策略的 AI 配置
    pub fn ai_config(&self, strategy: StrategyKind) -> AiConfig {
        AiConfig {
            strategy,
            tie_break: self.tie_break,
        }
    }
}
