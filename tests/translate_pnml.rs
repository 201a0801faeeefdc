//! PNML 到 FAST 的端到端翻译测试

use pn2fast::config::FastConfig;
use pn2fast::extern_tools::{FastTranslator, convert_to_fast, convert_to_fast_with};
use pn2fast::net::io::{from_json_str, pnml::import_pnml, to_json_string};
use pn2fast::net::Net;

const SCENARIO: &str = include_str!("fixtures/scenario.pnml");
const SCENARIO_DEFAULT_NS: &str = include_str!("fixtures/scenario_default_ns.pnml");
const SCENARIO_FST: &str = include_str!("fixtures/scenario.fst");
const MUTEX: &str = include_str!("fixtures/mutex.pnml");

const MUTEX_FST: &str = "\
model mutex {

var idle, lock, crit;

states marking;

transition enter := {
 from := marking;
 to := marking;
 guard := idle>=1 && lock>=1;
 action := idle'=idle-1, lock'=lock-1, crit'=crit+1;
};

transition leave := {
 from := marking;
 to := marking;
 guard := crit>=1;
 action := idle'=idle+1, lock'=lock+1, crit'=crit-1;
};

transition tau0 := {
 from := marking;
 to := marking;
 guard := lock>=1;
 action ;
};

}

strategy strat {
 setMaxState(2000);
 setMaxAcc(100);

 Region init := {idle=2 && lock=1 && crit=0&&state=marking};

 Transitions trans := {enter, leave, tau0};

 Region reach := post*(init, trans, 1);
}
";

fn load(document: &str) -> Net {
    import_pnml(document).expect("fixture should parse")
}

#[test]
fn scenario_matches_reference_output() {
    assert_eq!(convert_to_fast(&load(SCENARIO)), SCENARIO_FST);
}

#[test]
fn default_namespace_gives_identical_output() {
    assert_eq!(
        convert_to_fast(&load(SCENARIO_DEFAULT_NS)),
        convert_to_fast(&load(SCENARIO))
    );
}

#[test]
fn prefixed_mutex_net() {
    assert_eq!(convert_to_fast(&load(MUTEX)), MUTEX_FST);
}

#[test]
fn translating_twice_is_byte_identical() {
    let translator = FastTranslator::default();
    let first = translator.convert(&load(MUTEX));
    let second = translator.convert(&load(MUTEX));
    assert_eq!(first, second);
}

#[test]
fn silent_restriction_of_mutex() {
    let restricted = load(MUTEX).silent_restriction();
    let text = convert_to_fast(&restricted);

    assert!(text.contains("var idle, lock, crit;"));
    assert!(text.contains("transition tau0 := {"));
    assert!(!text.contains("transition enter"));
    assert!(text.contains(" Transitions trans := {tau0};"));
}

#[test]
fn init_region_override_replaces_marking() {
    let config = FastConfig {
        init_region: Some("idle + crit = 2 && lock + crit = 1".to_string()),
        ..FastConfig::default()
    };
    let text = convert_to_fast_with(&load(MUTEX), &config);

    assert!(text.contains(
        " Region init := {idle + crit = 2 && lock + crit = 1 && state=marking};"
    ));
    assert!(!text.contains("idle=2"));
}

#[test]
fn json_round_trip_preserves_translation() {
    let net = load(MUTEX);
    let reloaded: Net = from_json_str(&to_json_string(&net).unwrap()).unwrap();
    assert_eq!(convert_to_fast(&reloaded), convert_to_fast(&net));
}

#[test]
fn mutex_has_no_structural_issues() {
    assert!(!load(MUTEX).diagnose().has_issues());
}
