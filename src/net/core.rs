//! 网模型：按文档顺序保存库所、迁移与弧，并提供按标识查找与效应计算。
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::net::structure::{Arc, Place, Transition};

/// Petri 网连通性诊断报告
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticReport {
    /// 端点标识不存在的弧
    pub dangling_arcs: Vec<String>,
    /// 连接两个库所或两个迁移的弧
    pub same_kind_arcs: Vec<String>,
    /// 孤立库所（无任何连接的弧）
    pub isolated_places: Vec<(String, String)>,
    /// 孤立变迁（无任何连接的弧）
    pub isolated_transitions: Vec<(String, String)>,
    /// 总库所数
    pub total_places: usize,
    /// 总变迁数
    pub total_transitions: usize,
}

impl DiagnosticReport {
    /// 是否存在问题
    pub fn has_issues(&self) -> bool {
        !self.dangling_arcs.is_empty()
            || !self.same_kind_arcs.is_empty()
            || !self.isolated_places.is_empty()
            || !self.isolated_transitions.is_empty()
    }
}

impl fmt::Display for DiagnosticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} places, {} transitions",
            self.total_places, self.total_transitions
        )?;
        if !self.dangling_arcs.is_empty() {
            writeln!(f, "dangling arcs: {}", self.dangling_arcs.join(", "))?;
        }
        if !self.same_kind_arcs.is_empty() {
            writeln!(f, "same-kind arcs: {}", self.same_kind_arcs.join(", "))?;
        }
        for (id, name) in &self.isolated_places {
            writeln!(f, "isolated place [{}] {}", id, name)?;
        }
        for (id, name) in &self.isolated_transitions {
            writeln!(f, "isolated transition [{}] {}", id, name)?;
        }
        Ok(())
    }
}

/// 解析后不可变的网快照。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Net {
    pub name: String,
    pub places: IndexMap<String, Place>,
    pub transitions: IndexMap<String, Transition>,
    pub arcs: Vec<Arc>,
}

impl Net {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// 追加库所；重复的标识保留首次出现的位置，内容以后者为准。
    pub fn add_place(&mut self, place: Place) {
        self.places.insert(place.id.clone(), place);
    }

    pub fn add_transition(&mut self, transition: Transition) {
        self.transitions.insert(transition.id.clone(), transition);
    }

    pub fn add_arc(&mut self, arc: Arc) {
        self.arcs.push(arc);
    }

    pub fn places(&self) -> impl Iterator<Item = &Place> {
        self.places.values()
    }

    pub fn transitions(&self) -> impl Iterator<Item = &Transition> {
        self.transitions.values()
    }

    pub fn arcs(&self) -> impl Iterator<Item = &Arc> {
        self.arcs.iter()
    }

    pub fn place(&self, id: &str) -> Option<&Place> {
        self.places.get(id)
    }

    pub fn transition(&self, id: &str) -> Option<&Transition> {
        self.transitions.get(id)
    }

    pub fn places_len(&self) -> usize {
        self.places.len()
    }

    pub fn transitions_len(&self) -> usize {
        self.transitions.len()
    }

    /// 以 `transition` 为目标、以已知库所为源的消耗弧，按文档顺序。
    pub fn consuming_arcs<'a>(
        &'a self,
        transition: &'a Transition,
    ) -> impl Iterator<Item = (&'a Place, &'a Arc)> + 'a {
        self.arcs
            .iter()
            .filter(move |arc| arc.target == transition.id)
            .filter_map(move |arc| self.place(&arc.source).map(|place| (place, arc)))
    }

    /// 以 `transition` 为源、以已知库所为目标的生产弧，按文档顺序。
    pub fn producing_arcs<'a>(
        &'a self,
        transition: &'a Transition,
    ) -> impl Iterator<Item = (&'a Place, &'a Arc)> + 'a {
        self.arcs
            .iter()
            .filter(move |arc| arc.source == transition.id)
            .filter_map(move |arc| self.place(&arc.target).map(|place| (place, arc)))
    }

    /// 迁移发射一次对库所的净效应：`Σ w(t→p) − Σ w(p→t)`。
    ///
    /// 直接在弧关系上按源/目标标识检索，不匹配的弧贡献为 0。
    /// 求和在 `i128` 中进行，任意 `u64` 权重都不会溢出或变号。
    pub fn effect(&self, place: &Place, transition: &Transition) -> i128 {
        let weight_sum = |source: &str, target: &str| -> i128 {
            self.arcs
                .iter()
                .filter(|arc| arc.connects(source, target))
                .map(|arc| i128::from(arc.weight()))
                .sum()
        };
        weight_sum(&transition.id, &place.id) - weight_sum(&place.id, &transition.id)
    }

    /// 只保留静默迁移（名字含 `tau`）及其相连弧的子网，库所全部保留。
    pub fn silent_restriction(&self) -> Net {
        let mut restricted = Net::new(self.name.clone());
        for place in self.places() {
            restricted.add_place(place.clone());
        }
        for transition in self.transitions().filter(|t| t.is_silent()) {
            restricted.add_transition(transition.clone());
        }
        for arc in self.arcs() {
            if restricted.transitions.contains_key(&arc.source)
                || restricted.transitions.contains_key(&arc.target)
            {
                restricted.add_arc(arc.clone());
            }
        }
        log::debug!(
            "silent restriction of `{}`: {} of {} transitions kept",
            self.name,
            restricted.transitions_len(),
            self.transitions_len()
        );
        restricted
    }

    /// 诊断网的连通性，结果不影响翻译。
    pub fn diagnose(&self) -> DiagnosticReport {
        let mut report = DiagnosticReport {
            total_places: self.places_len(),
            total_transitions: self.transitions_len(),
            ..DiagnosticReport::default()
        };

        for arc in self.arcs() {
            let source_is_place = self.places.contains_key(&arc.source);
            let source_is_transition = self.transitions.contains_key(&arc.source);
            let target_is_place = self.places.contains_key(&arc.target);
            let target_is_transition = self.transitions.contains_key(&arc.target);

            if !(source_is_place || source_is_transition) || !(target_is_place || target_is_transition)
            {
                report.dangling_arcs.push(arc.id.clone());
            } else if (source_is_place && target_is_place)
                || (source_is_transition && target_is_transition)
            {
                report.same_kind_arcs.push(arc.id.clone());
            }
        }

        let touches = |id: &str| {
            self.arcs
                .iter()
                .any(|arc| arc.source == id || arc.target == id)
        };
        for place in self.places().filter(|p| !touches(&p.id)) {
            report
                .isolated_places
                .push((place.id.clone(), place.name.clone()));
        }
        for transition in self.transitions().filter(|t| !touches(&t.id)) {
            report
                .isolated_transitions
                .push((transition.id.clone(), transition.name.clone()));
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_net() -> Net {
        let mut net = Net::new("sample");
        net.add_place(Place::new("P1", "p1", Some(5)));
        net.add_place(Place::new("P2", "p2", None));
        net.add_transition(Transition::new("T1", "t1"));
        net.add_arc(Arc::new("A", "P1", "T1", Some(1)));
        net.add_arc(Arc::new("B", "T1", "P2", Some(2)));
        net
    }

    #[test]
    fn effect_is_produced_minus_consumed() {
        let net = sample_net();
        let t1 = net.transition("T1").unwrap();

        assert_eq!(net.effect(net.place("P1").unwrap(), t1), -1);
        assert_eq!(net.effect(net.place("P2").unwrap(), t1), 2);
    }

    #[test]
    fn effect_sums_parallel_arcs_and_cancels_self_loops() {
        let mut net = Net::new("loop");
        net.add_place(Place::new("p", "p", None));
        net.add_transition(Transition::new("t", "t"));
        net.add_arc(Arc::new("a0", "p", "t", None));
        net.add_arc(Arc::new("a1", "t", "p", None));
        net.add_arc(Arc::new("a2", "t", "p", Some(4)));
        net.add_arc(Arc::new("a3", "p", "t", Some(4)));

        let place = net.place("p").unwrap();
        let transition = net.transition("t").unwrap();
        assert_eq!(net.effect(place, transition), 0);
    }

    #[test]
    fn effect_handles_full_u64_weights() {
        let mut net = Net::new("wide");
        net.add_place(Place::new("p", "p", None));
        net.add_transition(Transition::new("t", "t"));
        net.add_arc(Arc::new("a0", "t", "p", Some(u64::MAX)));
        net.add_arc(Arc::new("a1", "t", "p", Some(1)));
        net.add_arc(Arc::new("a2", "p", "t", Some(i64::MAX as u64)));

        let place = net.place("p").unwrap();
        let transition = net.transition("t").unwrap();
        let expected = i128::from(u64::MAX) + 1 - i128::from(i64::MAX);
        assert_eq!(net.effect(place, transition), expected);
    }

    #[test]
    fn effect_of_unconnected_pair_is_zero() {
        let mut net = sample_net();
        net.add_place(Place::new("P3", "p3", None));

        let t1 = net.transition("T1").unwrap();
        assert_eq!(net.effect(net.place("P3").unwrap(), t1), 0);
    }

    #[test]
    fn consuming_arcs_skip_dangling_and_same_kind_arcs() {
        let mut net = sample_net();
        net.add_arc(Arc::new("C", "missing", "T1", None));
        net.add_arc(Arc::new("D", "P2", "T1", Some(3)));
        net.add_arc(Arc::new("E", "P1", "P2", None));

        let t1 = net.transition("T1").unwrap();
        let ids: Vec<_> = net.consuming_arcs(t1).map(|(_, arc)| arc.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "D"]);

        let produced: Vec<_> = net.producing_arcs(t1).map(|(p, _)| p.name.as_str()).collect();
        assert_eq!(produced, vec!["p2"]);
    }

    #[test]
    fn places_keep_document_order() {
        let mut net = Net::new("order");
        for id in ["z", "a", "m"] {
            net.add_place(Place::new(id, id, None));
        }
        let names: Vec<_> = net.places().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn silent_restriction_keeps_places_and_tau_transitions() {
        let mut net = sample_net();
        net.add_transition(Transition::new("T2", "tau2"));
        net.add_arc(Arc::new("C", "P2", "T2", None));
        net.add_arc(Arc::new("D", "T2", "P1", None));

        let restricted = net.silent_restriction();
        assert_eq!(restricted.places_len(), 2);
        let names: Vec<_> = restricted.transitions().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["tau2"]);
        let arcs: Vec<_> = restricted.arcs().map(|a| a.id.as_str()).collect();
        assert_eq!(arcs, vec!["C", "D"]);
    }

    #[test]
    fn diagnose_reports_structural_issues() {
        let mut net = sample_net();
        net.add_place(Place::new("P3", "p3", None));
        net.add_transition(Transition::new("T2", "t2"));
        net.add_arc(Arc::new("X", "nowhere", "T1", None));
        net.add_arc(Arc::new("Y", "P1", "P2", None));

        let report = net.diagnose();
        assert!(report.has_issues());
        assert_eq!(report.dangling_arcs, vec!["X".to_string()]);
        assert_eq!(report.same_kind_arcs, vec!["Y".to_string()]);
        assert_eq!(
            report.isolated_places,
            vec![("P3".to_string(), "p3".to_string())]
        );
        assert_eq!(
            report.isolated_transitions,
            vec![("T2".to_string(), "t2".to_string())]
        );
    }

    #[test]
    fn diagnose_clean_net() {
        let report = sample_net().diagnose();
        assert!(!report.has_issues());
        assert_eq!(report.total_places, 2);
        assert_eq!(report.total_transitions, 1);
    }
}
