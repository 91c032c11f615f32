use std::io::{self, BufRead, Write};

/// Yes/no question put to the user before a destructive action.
pub trait Confirm {
    fn confirm(&self, question: &str) -> bool;
}

/// Asks on stderr and reads the answer from stdin. Anything but y/yes is a no.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, question: &str) -> bool {
        let mut stderr = io::stderr();
        if write!(stderr, "{question} [y/N] ").and_then(|_| stderr.flush()).is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(_) => false,
        }
    }
}

/// Fixed answer, for `--yes` and tests.
pub struct Answer(pub bool);

impl Confirm for Answer {
    fn confirm(&self, _question: &str) -> bool {
        self.0
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
