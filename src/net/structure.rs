//! P/T 网静态结构元素：库所、迁移与弧。
use std::fmt;

use serde::{Deserialize, Serialize};

pub type Weight = u64;

/// 弧的默认权重。
pub const DEFAULT_WEIGHT: Weight = 1;
/// 库所的默认初始标识。
pub const DEFAULT_MARKING: Weight = 0;

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Debug)]
pub struct Place {
    pub id: String,
    pub name: String,
    /// 文档中读取到的原始初始标识，缺省或为空时为 `None`。
    pub marking: Option<Weight>,
}

impl Place {
    pub fn new(id: impl Into<String>, name: impl Into<String>, marking: Option<Weight>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            marking,
        }
    }

    /// 初始标识，缺省为 0。
    pub fn initial_marking(&self) -> Weight {
        self.marking.unwrap_or(DEFAULT_MARKING)
    }
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Transition {
    pub id: String,
    pub name: String,
}

impl Transition {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// 静默迁移：名字中含有 `tau`。
    pub fn is_silent(&self) -> bool {
        self.name.contains("tau")
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Transition")
            .field(&self.id)
            .field(&self.name)
            .finish()
    }
}

/// 有向带权弧。方向由端点隐含：库所到迁移为消耗弧，迁移到库所为生产弧。
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Arc {
    pub id: String,
    pub source: String,
    pub target: String,
    /// 文档中读取到的原始权重，缺省或为空时为 `None`。
    pub inscription: Option<Weight>,
}

impl Arc {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        inscription: Option<Weight>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            inscription,
        }
    }

    /// 弧权重，缺省为 1。
    pub fn weight(&self) -> Weight {
        self.inscription.unwrap_or(DEFAULT_WEIGHT)
    }

    pub fn connects(&self, source: &str, target: &str) -> bool {
        self.source == source && self.target == target
    }
}

impl fmt::Debug for Arc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arc")
            .field("id", &self.id)
            .field("source", &self.source)
            .field("target", &self.target)
            .field("weight", &self.weight())
            .finish()
    }
}
