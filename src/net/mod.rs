//! # Petri 网模型（Place/Transition Net）
//!
//! 设库所集合 `P`、迁移集合 `T`，弧关系 `F ⊆ (P×T) ∪ (T×P)` 带正整数权重 `w`。
//! 迁移 `t` 对库所 `p` 的净效应为
//!
//! ```text
//! effect(p, t) = Σ w(t, p) − Σ w(p, t)
//! ```
//!
//! 空和取 0。网在加载时一次性构建，此后只读，所有翻译阶段共享同一快照。
//!
//! ## 示例
//!
//! ```rust
//! use pn2fast::net::*;
//!
//! let mut net = Net::new("demo");
//! net.add_place(Place::new("p0", "p0", Some(1)));
//! net.add_place(Place::new("p1", "p1", None));
//! net.add_transition(Transition::new("t0", "t0"));
//! net.add_arc(Arc::new("a0", "p0", "t0", None));
//! net.add_arc(Arc::new("a1", "t0", "p1", Some(2)));
//!
//! let t0 = net.transition("t0").unwrap();
//! assert_eq!(net.effect(net.place("p0").unwrap(), t0), -1);
//! assert_eq!(net.effect(net.place("p1").unwrap(), t0), 2);
//! ```

pub mod core;
pub mod io;
pub mod structure;

pub use self::core::{DiagnosticReport, Net};
pub use self::structure::{Arc, Place, Transition, Weight};
