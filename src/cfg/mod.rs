//! cfg 模块 - 配置管理
//!
//! 通过 TypeOptions 描述"用哪个实现 + 该实现的配置"，并由 trait 注册表在运行时创建实例

#[macro_use]
pub mod macros;
pub mod registry;
pub mod type_options;

// 重新导出公共 API
pub use registry::{create_trait_from_type_options, register_trait};
pub use type_options::TypeOptions;
