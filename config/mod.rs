use crate::rtree::algorithms::bulk_load::LoadStrategy;
use crate::rtree::algorithms::traverse::TraversalMode;
use crate::rtree::rtree::DEFAULT_MAX_ENTRIES;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// rtree-bench 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RTreeConfig {
    /// 索引构建配置
    pub index: IndexSettings,

    /// 基准测试负载配置
    pub workload: WorkloadSettings,

    /// 日志配置
    pub logging: LoggingConfig,
}

/// 索引构建配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSettings {
    /// 节点最大条目数
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// 构建算法
    #[serde(default)]
    pub strategy: LoadStrategy,

    /// 查询使用的遍历方式
    #[serde(default)]
    pub traversal: TraversalMode,
}

/// 基准测试负载配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadSettings {
    /// 条目数量
    #[serde(default = "default_items")]
    pub items: usize,

    /// 查询次数
    #[serde(default = "default_queries")]
    pub queries: usize,

    /// 查询矩形边长
    #[serde(default = "default_query_size")]
    pub query_size: f64,

    /// 坐标范围
    #[serde(default = "default_extent")]
    pub extent: f64,

    /// 随机种子
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// 生成点（true）还是小矩形（false）
    #[serde(default = "default_points")]
    pub points: bool,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别：trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 日志输出：stdout, file
    #[serde(default = "default_log_output")]
    pub output: String,

    /// 日志文件路径（当 output = file 时）
    pub log_file: Option<PathBuf>,
}

// ============================================================================
// 默认值函数
// ============================================================================

fn default_max_entries() -> usize {
    DEFAULT_MAX_ENTRIES
}

fn default_items() -> usize {
    100_000
}

fn default_queries() -> usize {
    1_000
}

fn default_query_size() -> f64 {
    10.0
}

fn default_extent() -> f64 {
    1000.0
}

fn default_seed() -> u64 {
    42
}

fn default_points() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_output() -> String {
    "stdout".to_string()
}

// ============================================================================
// 实现
// ============================================================================

impl Default for RTreeConfig {
    fn default() -> Self {
        Self {
            index: IndexSettings {
                max_entries: default_max_entries(),
                strategy: LoadStrategy::default(),
                traversal: TraversalMode::default(),
            },
            workload: WorkloadSettings {
                items: default_items(),
                queries: default_queries(),
                query_size: default_query_size(),
                extent: default_extent(),
                seed: default_seed(),
                points: default_points(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
                output: default_log_output(),
                log_file: None,
            },
        }
    }
}

impl RTreeConfig {
    /// 从文件加载配置
    ///
    /// 配置加载顺序（优先级从低到高）：
    /// 1. 默认配置（内嵌的 default.toml）
    /// 2. 用户配置文件（可选）
    /// 3. 环境变量（RTREE__ 前缀，使用双下划线分隔嵌套）
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use rtree_bulk::config::RTreeConfig;
    ///
    /// // 加载配置（如果文件不存在，使用默认配置）
    /// let config = RTreeConfig::from_file("rtree-bench.toml").unwrap();
    /// ```
    pub fn from_file(path: &str) -> crate::Result<Self> {
        let settings = config::Config::builder()
            // 1. 加载默认配置（内嵌）
            .add_source(config::File::from_str(
                include_str!("default.toml"),
                config::FileFormat::Toml,
            ))
            // 2. 加载用户配置（可选，不存在不报错）
            .add_source(config::File::with_name(path).required(false))
            // 3. 加载环境变量（RTREE__ 前缀，双下划线分隔嵌套）
            .add_source(config::Environment::with_prefix("RTREE").separator("__"))
            .build()
            .map_err(|e| format!("Failed to load config: {}", e))?;

        Ok(settings
            .try_deserialize()
            .map_err(|e| format!("Failed to parse config: {}", e))?)
    }

    /// 保存配置到文件
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use rtree_bulk::config::RTreeConfig;
    ///
    /// let config = RTreeConfig::default();
    /// config.save_to_file("rtree-bench.toml").unwrap();
    /// ```
    pub fn save_to_file(&self, path: &str) -> crate::Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;
        std::fs::write(path, toml_string)
            .map_err(|e| format!("Failed to write config file: {}", e))?;
        Ok(())
    }

    /// 验证配置
    ///
    /// 检查配置的合法性，包括：
    /// - 节点最大条目数
    /// - 负载参数
    /// - 日志级别和输出
    pub fn validate(&self) -> Result<(), String> {
        if self.index.max_entries < 2 {
            return Err(format!(
                "Invalid max_entries: {}. Must be at least 2",
                self.index.max_entries
            ));
        }

        if self.workload.items == 0 {
            return Err("Workload items must be greater than 0".to_string());
        }
        if self.workload.queries == 0 {
            return Err("Workload queries must be greater than 0".to_string());
        }
        if self.workload.extent.is_nan() || self.workload.extent <= 0.0 {
            return Err(format!(
                "Workload extent must be positive, got {}",
                self.workload.extent
            ));
        }
        if self.workload.query_size.is_nan() || self.workload.query_size < 0.0 {
            return Err(format!(
                "Workload query_size must not be negative, got {}",
                self.workload.query_size
            ));
        }

        // 验证日志级别
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(format!(
                    "Invalid log level: '{}'. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                ))
            }
        }

        // 验证日志输出
        match self.logging.output.as_str() {
            "stdout" | "file" => {}
            _ => {
                return Err(format!(
                    "Invalid log output: '{}'. Must be one of: stdout, file",
                    self.logging.output
                ))
            }
        }

        // 验证日志文件配置
        if self.logging.output == "file" && self.logging.log_file.is_none() {
            return Err("Log output is 'file' but log_file path is not specified".to_string());
        }

        Ok(())
    }

    /// 打印配置摘要
    pub fn print_summary(&self) {
        println!("📋 R-tree Bench Configuration:");
        println!("   Strategy:    {}", self.index.strategy);
        println!("   Max Entries: {}", self.index.max_entries);
        println!("   Traversal:   {:?}", self.index.traversal);
        println!();
        println!(
            "   Items:       {} {}",
            self.workload.items,
            if self.workload.points {
                "points"
            } else {
                "rectangles"
            }
        );
        println!("   Queries:     {}", self.workload.queries);
        println!("   Query Size:  {}", self.workload.query_size);
        println!("   Extent:      {}", self.workload.extent);
        println!("   Seed:        {}", self.workload.seed);
        println!();
        println!("   Log Level:   {}", self.logging.level);
        println!("   Log Output:  {}", self.logging.output);
        if let Some(ref log_file) = self.logging.log_file {
            println!("   Log File:    {}", log_file.display());
        }
        println!();
    }
}
