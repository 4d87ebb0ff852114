use game_types::{Outcome, Selection};

pub struct RulesEngine;

impl RulesEngine {
    /// The two selections each selection defeats
    pub fn defeats(selection: Selection) -> [Selection; 2] {
        match selection {
            Selection::Rock => [Selection::Scissors, Selection::Lizard],
            Selection::Paper => [Selection::Rock, Selection::Spock],
            Selection::Scissors => [Selection::Paper, Selection::Lizard],
            Selection::Lizard => [Selection::Spock, Selection::Paper],
            Selection::Spock => [Selection::Rock, Selection::Scissors],
        }
    }

    pub fn beats(attacker: Selection, defender: Selection) -> bool {
        Self::defeats(attacker).contains(&defender)
    }

    /// Resolve a round from the user's point of view
    pub fn resolve(user: Selection, computer: Selection) -> Outcome {
        if user == computer {
            Outcome::Tie
        } else if Self::beats(user, computer) {
            Outcome::User
        } else {
            Outcome::Computer
        }
    }

    /// Human-readable line appended to a game's record
    pub fn describe(user: Selection, computer: Selection, outcome: Outcome) -> String {
        let verdict = match outcome {
            Outcome::User => "You win!",
            Outcome::Computer => "You lose!",
            Outcome::Tie => "Tie! Play RPSLS again.",
        };

        format!(
            "User plays {}. Computer plays {}. {}",
            user, computer, verdict
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_examples() {
        assert_eq!(
            RulesEngine::resolve(Selection::Rock, Selection::Scissors),
            Outcome::User
        );
        assert_eq!(
            RulesEngine::resolve(Selection::Lizard, Selection::Spock),
            Outcome::User
        );
        assert_eq!(
            RulesEngine::resolve(Selection::Paper, Selection::Paper),
            Outcome::Tie
        );
        assert_eq!(
            RulesEngine::resolve(Selection::Scissors, Selection::Rock),
            Outcome::Computer
        );
    }

    #[test]
    fn test_resolution_is_antisymmetric() {
        for a in Selection::ALL {
            for b in Selection::ALL {
                if RulesEngine::beats(a, b) {
                    assert!(
                        !RulesEngine::beats(b, a),
                        "{} beats {} but {} also beats {}",
                        a,
                        b,
                        b,
                        a
                    );
                }
            }
        }
    }

    #[test]
    fn test_selection_ties_only_with_itself() {
        for a in Selection::ALL {
            for b in Selection::ALL {
                let tie = RulesEngine::resolve(a, b) == Outcome::Tie;
                assert_eq!(tie, a == b, "{} vs {}", a, b);
            }
        }
    }

    #[test]
    fn test_every_distinct_pair_has_exactly_one_winner() {
        for a in Selection::ALL {
            for b in Selection::ALL.into_iter().filter(|b| *b != a) {
                assert!(RulesEngine::beats(a, b) ^ RulesEngine::beats(b, a));
            }
            // Each selection defeats exactly two others and never itself
            assert!(!RulesEngine::beats(a, a));
            let wins = Selection::ALL
                .into_iter()
                .filter(|b| RulesEngine::beats(a, *b))
                .count();
            assert_eq!(wins, 2);
        }
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            RulesEngine::describe(Selection::Rock, Selection::Scissors, Outcome::User),
            "User plays rock. Computer plays scissors. You win!"
        );
        assert_eq!(
            RulesEngine::describe(Selection::Spock, Selection::Lizard, Outcome::Computer),
            "User plays spock. Computer plays lizard. You lose!"
        );
        assert_eq!(
            RulesEngine::describe(Selection::Paper, Selection::Paper, Outcome::Tie),
            "User plays paper. Computer plays paper. Tie! Play RPSLS again."
        );
    }
}
