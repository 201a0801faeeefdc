//! FAST 输入语言生成：`model` 段描述带卫式的迁移系统，`strategy` 段描述前向可达计算。
//!
//! ```text
//! model <net> {
//! var <p1>, …, <pn>;
//! states marking;
//! transition <t> := { from := marking; to := marking; guard := …; action := …; };
//! }
//! strategy strat {
//!  Region init := {<p>=<m0> && …&&state=marking};
//!  Transitions trans := {<t1>, …};
//!  Region reach := post*(init, trans, 1);
//! }
//! ```
//!
//! 每个片段都是网快照上的纯函数，输出顺序只取决于文档顺序。
use std::path::Path;

use itertools::Itertools;

use crate::config::FastConfig;
use crate::net::core::Net;
use crate::net::io::{IoError, write_string};
use crate::net::structure::{Place, Transition};

/// 迁移的使能条件：每条消耗弧一个 `place>=weight` 合取项，以 `;` 结束。
/// 没有消耗弧时返回空串。
pub fn guard(net: &Net, transition: &Transition) -> String {
    let conjuncts = net
        .consuming_arcs(transition)
        .map(|(place, arc)| format!("{}>={}", place.name, arc.weight()))
        .join(" && ");
    if conjuncts.is_empty() {
        conjuncts
    } else {
        conjuncts + ";"
    }
}

fn assignment(place: &Place, effect: i128) -> String {
    if effect > 0 {
        format!("{}'={}+{}", place.name, place.name, effect)
    } else {
        format!("{}'={}{}", place.name, place.name, effect)
    }
}

/// 迁移的赋值表 `:= p'=p+k, q'=q-j`，效应为 0 的库所不出现。
/// 所有库所效应均为 0 时返回空串。
///
/// 注意：返回值不含结尾的 `;`，由 [`transition_block`] 在 `action` 行末统一补上。
pub fn action(net: &Net, transition: &Transition) -> String {
    let effects: Vec<(&Place, i128)> = net
        .places()
        .map(|place| (place, net.effect(place, transition)))
        .collect();

    let Some(first) = effects.iter().position(|(_, effect)| *effect != 0) else {
        return String::new();
    };

    let mut action = String::new();
    for (index, (place, effect)) in effects.iter().enumerate() {
        if *effect == 0 {
            continue;
        }
        action.push_str(if index == first { ":= " } else { ", " });
        action.push_str(&assignment(place, *effect));
    }
    action
}

pub fn transition_block(net: &Net, transition: &Transition) -> String {
    format!(
        "transition {} := {{\n from := marking;\n to := marking;\n guard := {}\n action {};\n}};\n",
        transition.name,
        guard(net, transition),
        action(net, transition)
    )
}

pub fn var_declaration(net: &Net) -> String {
    format!("var {};", net.places().map(|place| &place.name).join(", "))
}

pub fn emit_model(net: &Net) -> String {
    let mut model = format!(
        "model {} {{\n\n{}\n\nstates marking;\n\n",
        net.name,
        var_declaration(net)
    );
    for transition in net.transitions() {
        model.push_str(&transition_block(net, transition));
        model.push('\n');
    }
    model.push_str("}\n");
    model
}

/// 初始区域。未给出覆盖区域时为各库所初始标识的合取。
pub fn init_region(net: &Net, config: &FastConfig) -> String {
    match &config.init_region {
        Some(region) => format!("{} && state=marking", region),
        None => format!(
            "{}&&state=marking",
            net.places()
                .map(|place| format!("{}={}", place.name, place.initial_marking()))
                .join(" && ")
        ),
    }
}

pub fn transition_set(net: &Net) -> String {
    net.transitions()
        .map(|transition| &transition.name)
        .join(", ")
}

pub fn emit_strategy(net: &Net) -> String {
    emit_strategy_with(net, &FastConfig::default())
}

pub fn emit_strategy_with(net: &Net, config: &FastConfig) -> String {
    format!(
        "strategy {} {{\n setMaxState({});\n setMaxAcc({});\n\n Region init := {{{}}};\n\n Transitions trans := {{{}}};\n\n Region reach := post*(init, trans, {});\n}}\n",
        config.strategy_name,
        config.max_state,
        config.max_acc,
        init_region(net, config),
        transition_set(net),
        config.post_depth
    )
}

pub fn convert_to_fast(net: &Net) -> String {
    convert_to_fast_with(net, &FastConfig::default())
}

pub fn convert_to_fast_with(net: &Net, config: &FastConfig) -> String {
    format!("{}\n{}", emit_model(net), emit_strategy_with(net, config))
}

#[derive(Debug, Default)]
pub struct FastTranslator {
    pub config: FastConfig,
}

impl FastTranslator {
    pub fn new(config: FastConfig) -> Self {
        Self { config }
    }

    /// 将 Petri 网转换为 FAST 格式
    pub fn convert(&self, net: &Net) -> String {
        log::debug!(
            "translating `{}` ({} places, {} transitions) to FAST",
            net.name,
            net.places_len(),
            net.transitions_len()
        );
        convert_to_fast_with(net, &self.config)
    }

    pub fn write_fst<P: AsRef<Path>>(&self, net: &Net, path: P) -> Result<(), IoError> {
        write_string(path, &self.convert(net))
    }
}
