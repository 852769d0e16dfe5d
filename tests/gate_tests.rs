use gray_fingering::config::{Config, CONFIRM_PHRASE};
use gray_fingering::gate::{AuthGate, Confirm};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug)]
enum Answer {
    Correct,
    Incorrect,
    NoInput,
}

struct Scripted {
    answer: Answer,
    asked: bool,
}

impl Confirm for Scripted {
    fn ask(&mut self, phrase: &str) -> Option<String> {
        self.asked = true;
        match self.answer {
            Answer::Correct => Some(phrase.to_string()),
            Answer::Incorrect => Some(phrase.to_lowercase()),
            Answer::NoInput => None,
        }
    }
}

#[test]
fn decision_requires_all_three_signals() {
    let dir = tempfile::tempdir().unwrap();
    let present = dir.path().join("authorization.txt");
    std::fs::write(&present, "signed scope letter").unwrap();
    let absent: PathBuf = dir.path().join("missing.txt");
    let config = Config::default();

    let mut checked = 0;
    for env_set in [true, false] {
        for auth_present in [true, false] {
            for answer in [Answer::Correct, Answer::Incorrect, Answer::NoInput] {
                let env = if env_set { Some("1".to_string()) } else { None };
                let path = if auth_present { &present } else { &absent };
                let gate = AuthGate::with_env_value(&config, env, path);
                let mut prompt = Scripted { answer, asked: false };

                let decision = gate.decide(&mut prompt);
                let expected = env_set && auth_present && matches!(answer, Answer::Correct);
                assert_eq!(decision.execute(), expected, "env={env_set} auth={auth_present} answer={answer:?}");
                assert_eq!(prompt.asked, env_set && auth_present, "prompt only shown when env and auth pass");
                checked += 1;
            }
        }
    }
    assert_eq!(checked, 12);
}

#[test]
fn sentinel_must_match_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let auth = dir.path().join("auth");
    std::fs::write(&auth, "ok").unwrap();
    let config = Config::default();

    for value in ["0", "true", " 1", "yes", ""] {
        let gate = AuthGate::with_env_value(&config, Some(value.to_string()), &auth);
        let mut prompt = Scripted { answer: Answer::Correct, asked: false };
        assert!(!gate.decide(&mut prompt).execute(), "value {value:?} must not unlock");
        assert!(!prompt.asked);
    }
}

#[test]
fn directory_is_not_an_auth_file() {
    let dir = tempfile::tempdir().unwrap();
    let gate = AuthGate::with_env_value(&Config::default(), Some("1".into()), dir.path());
    assert!(gate.env_allowed());
    assert!(!gate.auth_readable());
}

#[test]
fn phrase_comparison_is_case_sensitive() {
    assert_ne!(CONFIRM_PHRASE.to_lowercase(), CONFIRM_PHRASE);
    let dir = tempfile::tempdir().unwrap();
    let auth = dir.path().join("auth");
    std::fs::write(&auth, "ok").unwrap();
    let gate = AuthGate::with_env_value(&Config::default(), Some("1".into()), &auth);
    let mut prompt = Scripted { answer: Answer::Incorrect, asked: false };
    assert!(!gate.decide(&mut prompt).execute());
}
