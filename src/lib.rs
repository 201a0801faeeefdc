//! Place/Transition 网到 FAST 输入语言的翻译器。
//!
//! 读取 PNML 描述的 P/T 网，生成 FAST 可达性引擎所需的
//! `model { … }` 与 `strategy { … }` 两段文本。

pub mod config;
pub mod driver;
pub mod extern_tools;
pub mod net;
pub mod options;
