use nda::automaton::{StateSet, Symbol};
use nda::{Automaton, DefinitionError, load_file, parse_definition};
use std::io::Write;

fn automaton(definition: &str) -> Automaton {
    parse_definition(definition).unwrap()
}

/// Set-based simulation: track every state the automaton can be in.
fn simulate(automaton: &Automaton, text: &str) -> bool {
    let closure_of = |ids: &StateSet| -> StateSet {
        let mut closure = StateSet::default();
        for id in ids.iter() {
            let label = automaton.state_by_id(id).unwrap().label();
            for reached in automaton.epsilon_closure(label).unwrap().iter() {
                closure.insert(reached);
            }
        }
        closure
    };

    if text.chars().any(|c| !automaton.alphabet().contains(&c)) {
        return false;
    }

    let mut current = closure_of(&[automaton.initial().unwrap().id()].into_iter().collect());
    for c in text.chars() {
        let mut next = StateSet::default();
        for id in current.iter() {
            let state = automaton.state_by_id(id).unwrap();
            for label in state.transitions_for(Symbol::Char(c)).unwrap_or_default() {
                next.insert(automaton.state(label).unwrap().id());
            }
        }
        current = closure_of(&next);
    }
    current.iter().any(|id| automaton.is_final(id))
}

/// All strings over `alphabet` up to `max_len` characters, including "".
fn words(alphabet: &[char], max_len: usize) -> Vec<String> {
    let mut words = vec![String::new()];
    let mut frontier = vec![String::new()];
    for _ in 0..max_len {
        frontier = frontier
            .iter()
            .flat_map(|word| {
                alphabet.iter().map(move |c| {
                    let mut longer = word.clone();
                    longer.push(*c);
                    longer
                })
            })
            .collect();
        words.extend(frontier.iter().cloned());
    }
    words
}

const SINGLE: &str = "Q = {A;B}\nE = {a;b}\nS = {A[a-B]}\nq = A\nF = {B}";

#[test]
fn test_single_transition() {
    let nda = automaton(SINGLE);
    assert!(nda.recognize("a"));
    assert!(!nda.recognize("b"));
    assert!(!nda.recognize(""));
    assert!(!nda.recognize("aa"));
}

#[test]
fn test_epsilon_cycle() {
    let nda = automaton("Q = {A;B}\nE = {a;b}\nS = {A[a-B];B[-A]}\nq = A\nF = {B}");
    assert!(nda.recognize("a"));
}

#[test]
fn test_pure_epsilon_chain() {
    let nda = automaton("Q = {A;B;C}\nE = {}\nS = {A[-B];B[-C]}\nq = A\nF = {C}");
    assert!(nda.recognize(""));
}

#[test]
fn test_branching() {
    let nda = automaton(
        "Q = {A;B;C;D;E}\nE = {a;b}\nS = {A[a-B,C];B[b-D];C[b-E]}\nq = A\nF = {D}",
    );
    assert!(nda.recognize("ab"));
}

#[test]
fn test_out_of_alphabet() {
    let nda = automaton(SINGLE);
    for text in ["é", "aé", "a ", "ab\u{1F600}"] {
        assert!(!nda.recognize(text), "{text:?} should be rejected");
    }
}

#[test]
fn test_empty_string_follows_epsilon_reachability() {
    // Initial state final
    assert!(automaton("Q = {A}\nE = {a}\nS = {}\nq = A\nF = {A}").recognize(""));
    // Final reachable through an epsilon cycle
    assert!(automaton("Q = {A;B;C}\nE = {a}\nS = {A[-B];B[-A,C]}\nq = A\nF = {C}").recognize(""));
    // Final only reachable by reading input
    assert!(!automaton("Q = {A;B}\nE = {a}\nS = {A[a-B]}\nq = A\nF = {B}").recognize(""));
}

#[test]
fn test_repeated_calls_are_idempotent() {
    let nda = automaton("Q = {A;B;C}\nE = {a;b}\nS = {A[-B];B[-A];A[a-C];C[-A]}\nq = A\nF = {C}");
    let first: Vec<bool> = words(&['a', 'b'], 4).iter().map(|w| nda.recognize(w)).collect();
    for _ in 0..3 {
        let again: Vec<bool> = words(&['a', 'b'], 4).iter().map(|w| nda.recognize(w)).collect();
        assert_eq!(first, again);
    }
}

#[test]
fn test_agrees_with_set_simulation() {
    let definitions = [
        SINGLE,
        "Q = {A;B}\nE = {a;b}\nS = {A[a-B];B[-A]}\nq = A\nF = {B}",
        "Q = {A;B;C;D;E}\nE = {a;b}\nS = {A[a-B,C];B[b-D];C[b-E]}\nq = A\nF = {D;E}",
        // Epsilon cycles on both sides of a symbol transition
        "Q = {A;B;C;D}\nE = {a;b}\nS = {A[-B];B[-A];A[a-C];C[-D];D[-C];D[b-A]}\nq = A\nF = {D}",
        // Self loops and a trap state
        "Q = {A;B;T}\nE = {a;b}\nS = {A[a-A,B];A[b-T];B[b-B];B[-A];T[-T]}\nq = A\nF = {B}",
        // Epsilon into a state that needs the same symbol again
        "Q = {A;B;C}\nE = {a}\nS = {A[-B];B[a-C];C[-A]}\nq = A\nF = {C}",
    ];

    for definition in definitions {
        let nda = automaton(definition);
        for word in words(&['a', 'b'], 5) {
            assert_eq!(
                nda.recognize(&word),
                simulate(&nda, &word),
                "{word:?} on\n{definition}"
            );
        }
    }
}

#[test]
fn test_shared_between_threads() {
    let nda = automaton("Q = {A;B}\nE = {a;b}\nS = {A[a-B];B[-A]}\nq = A\nF = {B}");
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..100 {
                    assert!(nda.recognize("aaa"));
                    assert!(!nda.recognize("ab"));
                }
            });
        }
    });
}

#[test]
fn test_load_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Q = {{A;B;C;D}}").unwrap();
    writeln!(file, "E = {{y;i;o}}").unwrap();
    writeln!(file, "S = {{A[y-B,A];B[i-C];C[-D];D[o-D]}}").unwrap();
    writeln!(file, "q = A").unwrap();
    writeln!(file, "F = {{D}}").unwrap();
    file.flush().unwrap();

    let nda = load_file(file.path()).unwrap();
    assert!(nda.recognize("yio"));
    assert!(!nda.recognize("io"));
}

#[test]
fn test_load_file_reports_bad_definition() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "Q = {{A}}\nS = {{A[a-Z]}}\nq = A\n").unwrap();
    file.flush().unwrap();

    let err = load_file(file.path()).unwrap_err();
    assert!(matches!(err, DefinitionError::Automaton(_)));
}
