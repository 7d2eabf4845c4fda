use std::fmt;

/// Where a clause falls within its paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    First,
    Following,
}

impl Position {
    /// Leading text of a clause that links to the previous one.
    pub fn connective(self) -> &'static str {
        match self {
            Position::First => " ",
            Position::Following => " Por otro lado, ",
        }
    }

    /// `word` as it should open the clause: capitalized when first,
    /// lower-cased after the connective.
    pub fn opening(self, word: &str) -> String {
        match self {
            Position::First => capitalize_first(word),
            Position::Following => lowercase_first(word),
        }
    }
}

/// One sentence of a narrative, with its leading connective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    connective: &'static str,
    body: String,
}

impl Clause {
    /// A clause that starts its own sentence (" Al comparar ...").
    pub fn standalone(body: impl Into<String>) -> Self {
        Clause {
            connective: " ",
            body: body.into(),
        }
    }

    /// A clause whose connective depends on its position.
    pub fn at(position: Position, body: impl Into<String>) -> Self {
        Clause {
            connective: position.connective(),
            body: body.into(),
        }
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.connective, self.body)
    }
}

/// Render steps in order, threading whether a clause was already emitted.
///
/// `render` returns `None` for steps that produce no clause; those leave
/// the position unchanged.
pub fn fold_clauses<S, F>(steps: impl IntoIterator<Item = S>, mut render: F) -> Vec<Clause>
where
    F: FnMut(S, Position) -> Option<Clause>,
{
    let (clauses, _) = steps.into_iter().fold(
        (Vec::new(), Position::First),
        |(mut clauses, position), step| match render(step, position) {
            Some(clause) => {
                clauses.push(clause);
                (clauses, Position::Following)
            }
            None => (clauses, position),
        },
    );
    clauses
}

/// Join a preamble and its clauses into one paragraph.
pub fn paragraph(preamble: &str, clauses: &[Clause]) -> String {
    let mut out = String::from(preamble);
    for clause in clauses {
        out.push_str(&clause.to_string());
    }
    out
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_word() {
        assert_eq!(Position::First.opening("al"), "Al");
        assert_eq!(Position::Following.opening("Al"), "al");
    }

    #[test]
    fn test_fold_tracks_prior_clause() {
        let clauses = fold_clauses(["a", "skip", "b", "c"], |step, pos| {
            if step == "skip" {
                return None;
            }
            Some(Clause::at(pos, format!("{}.", pos.opening(step))))
        });
        let text = paragraph("P.", &clauses);
        assert_eq!(text, "P. A. Por otro lado, b. Por otro lado, c.");
    }

    #[test]
    fn test_fold_skipped_first_keeps_first_position() {
        let clauses = fold_clauses([false, true], |emit, pos| {
            emit.then(|| Clause::at(pos, pos.opening("no existe.")))
        });
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].to_string(), " No existe.");
    }
}
