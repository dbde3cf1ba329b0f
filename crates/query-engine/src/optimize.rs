use model::{Connective, Expr};
use tracing::trace;

/// Orders members that share a grouping key; lower ranks come first.
pub type Rank = fn(&Expr) -> usize;

/// Factors shared leading terms out of sibling fragments.
///
/// Each fragment is read as a chain of conjunction terms. Fragments whose
/// chains start with the same term are merged into one
/// `key AND (rest₁ ⊕ rest₂ ⊕ …)` where `⊕` is the connective of the join
/// point, so the shared term is evaluated once. Fragments consisting of a
/// single term are passed through ahead of the merged groups.
///
/// This only preserves the result for side-effect-free terms: merging changes
/// how often, and in which order, terms are evaluated.
#[derive(Debug, Clone, Copy)]
pub struct Optimizer {
    rank: Rank,
}

impl Default for Optimizer {
    fn default() -> Self {
        Self {
            rank: Expr::connective_count,
        }
    }
}

impl Optimizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different ordering for grouped members.
    pub fn with_rank(rank: Rank) -> Self {
        Self { rank }
    }

    pub fn optimize(&self, fragments: Vec<Expr>, connective: Connective) -> Vec<Expr> {
        let input_len = fragments.len();
        let mut singletons: Vec<Expr> = Vec::new();
        let mut groups: Vec<(Expr, Vec<Expr>)> = Vec::new();

        for fragment in &fragments {
            let mut terms: Vec<&Expr> = Vec::new();
            for term in fragment.terms() {
                if !terms.contains(&term) {
                    terms.push(term);
                }
            }

            match terms.split_first() {
                Some((key, rest)) if !rest.is_empty() => {
                    let member = Expr::and(rest.iter().map(|term| (*term).clone()));
                    match groups.iter().position(|(k, _)| k == *key) {
                        Some(i) => groups[i].1.push(member),
                        None => groups.push(((*key).clone(), vec![member])),
                    }
                }
                Some((only, _)) => {
                    if !singletons.contains(*only) {
                        singletons.push((*only).clone());
                    }
                }
                None => {}
            }
        }

        let rank = self.rank;
        let grouped = groups.into_iter().map(|(key, mut members)| {
            members.sort_by_key(|member| rank(member));
            let rest = match members.len() {
                0 => None,
                1 => members.pop(),
                _ => connective.join(members),
            };
            match rest {
                Some(rest) => Expr::and([key, rest]),
                None => key,
            }
        });

        let optimized: Vec<Expr> = singletons.into_iter().chain(grouped).collect();
        trace!(
            "Optimized {} fragment(s) into {} at {:?} join",
            input_len,
            optimized.len(),
            connective
        );
        optimized
    }
}
