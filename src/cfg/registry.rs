// 类型注册表和工厂函数

use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::RwLock;

use super::type_options::TypeOptions;

// Trait-based 构造函数类型
// 返回 Box<dyn Any>，实际包含的是 Box<dyn Trait>
type TraitConstructor = Box<dyn Fn(JsonValue) -> Result<Box<dyn Any + Send + Sync>> + Send + Sync>;

// Trait 注册表：为每个 Trait 类型维护一个独立的注册表
// 外层 HashMap 的 key 是 Trait 的 TypeId，内层 HashMap 的 key 是类型名称
static TRAIT_REGISTRY: Lazy<RwLock<HashMap<TypeId, HashMap<String, TraitConstructor>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// 为实现特定 Trait 的类型注册构造函数
///
/// 构造过程允许失败：任何实现了 `From<Config>` 的类型自动满足 `TryFrom<Config>`，
/// 需要打开文件等资源的实现可以直接实现 `TryFrom<Config>`。
///
/// # 类型参数
/// - `T`: 具体实现类型
/// - `Trait`: 目标 trait（使用 `dyn Trait` 形式）
/// - `Config`: 配置类型
///
/// # 示例
/// ```ignore
/// register_trait::<ConsoleAppender, dyn LogAppender, ConsoleAppenderConfig>("ConsoleAppender")?;
///
/// let appender: Box<dyn LogAppender> = create_trait_from_type_options(&type_options)?;
/// ```
pub fn register_trait<T, Trait, Config>(type_name: &str) -> Result<()>
where
    T: TryFrom<Config> + Send + Sync + 'static,
    <T as TryFrom<Config>>::Error: Into<anyhow::Error>,
    Trait: ?Sized + Send + Sync + 'static,
    Config: DeserializeOwned + Send + Sync + 'static,
    Box<T>: Into<Box<Trait>>,
{
    let type_name = type_name.to_string();
    let trait_id = TypeId::of::<Trait>();

    let constructor: TraitConstructor = Box::new(move |value| {
        // 未提供 options 时按空对象处理，交给配置的 serde(default) 补全
        let value = if value.is_null() {
            JsonValue::Object(serde_json::Map::new())
        } else {
            value
        };
        let config: Config = serde_json::from_value(value)?;
        let instance = T::try_from(config).map_err(Into::into)?;
        let trait_object: Box<Trait> = Box::new(instance).into();
        // 将 Box<dyn Trait> 包装成 Box<dyn Any>
        Ok(Box::new(trait_object) as Box<dyn Any + Send + Sync>)
    });

    let mut registry = TRAIT_REGISTRY
        .write()
        .map_err(|_| anyhow!("Failed to acquire write lock"))?;
    registry
        .entry(trait_id)
        .or_insert_with(HashMap::new)
        .insert(type_name, constructor);

    Ok(())
}

/// 根据 TypeOptions 创建 trait object
///
/// # 示例
/// ```ignore
/// let type_options = TypeOptions::from_json(r#"{"type": "FileAppender", "options": {...}}"#)?;
/// let appender: Box<dyn LogAppender> = create_trait_from_type_options(&type_options)?;
/// ```
pub fn create_trait_from_type_options<Trait>(type_options: &TypeOptions) -> Result<Box<Trait>>
where
    Trait: ?Sized + Send + Sync + 'static,
{
    let trait_id = TypeId::of::<Trait>();
    let registry = TRAIT_REGISTRY
        .read()
        .map_err(|_| anyhow!("Failed to acquire read lock"))?;

    let trait_registry = registry
        .get(&trait_id)
        .ok_or_else(|| anyhow!("No implementations registered for trait"))?;

    let constructor = trait_registry.get(&type_options.type_name).ok_or_else(|| {
        anyhow!(
            "Type '{}' not registered for this trait",
            type_options.type_name
        )
    })?;

    let any_box = constructor(type_options.options.clone())?;

    // 从 Box<dyn Any> 中取回 Box<dyn Trait>
    any_box
        .downcast::<Box<Trait>>()
        .map(|boxed| *boxed)
        .map_err(|_| anyhow!("Failed to downcast to target trait type"))
}
