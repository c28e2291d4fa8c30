use super::*;
use serde_json::json;

#[test]
fn parse_fades() {
    assert_eq!(
        parse_transition("fade_in", &serde_json::Value::Null).unwrap(),
        TransitionFx::FadeIn
    );
    assert_eq!(
        parse_transition(" Fade-Out ", &serde_json::Value::Null).unwrap(),
        TransitionFx::FadeOut
    );
}

#[test]
fn parse_wipe_defaults_and_params() {
    assert_eq!(
        parse_transition("wipe", &serde_json::Value::Null).unwrap(),
        TransitionFx::Wipe {
            dir: WipeDir::LeftToRight,
            soft_edge: 0.0
        }
    );
    assert_eq!(
        parse_transition("wipe", &json!({ "dir": "btt", "soft_edge": 4.0 })).unwrap(),
        TransitionFx::Wipe {
            dir: WipeDir::BottomToTop,
            soft_edge: 1.0
        }
    );
}

#[test]
fn parse_rejects_unknown_kinds_and_dirs() {
    assert!(parse_transition("", &serde_json::Value::Null).is_err());
    assert!(parse_transition("spin", &serde_json::Value::Null).is_err());
    assert!(parse_transition("wipe", &json!({ "dir": "diagonal" })).is_err());
    assert!(parse_transition("wipe", &json!([1, 2])).is_err());
}

#[test]
fn names_are_stable() {
    assert_eq!(TransitionFx::FadeIn.name(), "fade_in");
    assert_eq!(
        TransitionFx::Wipe {
            dir: WipeDir::TopToBottom,
            soft_edge: 0.2
        }
        .name(),
        "wipe"
    );
}

#[test]
fn wipe_dir_parses_aliases_case_insensitively() {
    assert_eq!(" RTL ".parse::<WipeDir>().unwrap(), WipeDir::RightToLeft);
    assert_eq!("top_to_bottom".parse::<WipeDir>().unwrap(), WipeDir::TopToBottom);
    assert!("up".parse::<WipeDir>().is_err());
}

#[test]
fn wipe_soft_edge_is_clamped_and_ignores_other_keys() {
    let fx = parse_transition("wipe", &json!({ "soft_edge": -2.0, "extra": true })).unwrap();
    assert_eq!(
        fx,
        TransitionFx::Wipe {
            dir: WipeDir::LeftToRight,
            soft_edge: 0.0
        }
    );
}
