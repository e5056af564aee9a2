use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ActorRef, MovieRef};

/// One edge traversal: `from_actor` acted with `to_actor` in `movie`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hop {
    pub from_actor: String,
    pub movie: String,
    pub to_actor: String,
}

impl Hop {
    pub fn new(from: &ActorRef, movie: &MovieRef, to: &ActorRef) -> Self {
        Self {
            from_actor: from.name.clone(),
            movie: movie.title.clone(),
            to_actor: to.name.clone(),
        }
    }
}

impl fmt::Display for Hop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → 「{}」 → {}", self.from_actor, self.movie, self.to_actor)
    }
}

/// Ordered hops from the start actor to the target actor.
///
/// An empty path means start and target are the same actor. "No path" is
/// expressed by the search outcome, never by this type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionPath {
    hops: Vec<Hop>,
}

impl ConnectionPath {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_hops(hops: Vec<Hop>) -> Self {
        Self { hops }
    }

    /// A new path with `hop` appended. The receiver is left untouched because
    /// sibling frontier entries share the same prefix.
    pub fn extended(&self, hop: Hop) -> Self {
        let mut hops = Vec::with_capacity(self.hops.len() + 1);
        hops.extend_from_slice(&self.hops);
        hops.push(hop);
        Self { hops }
    }

    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    /// True for the self-connection path.
    pub fn is_self_connection(&self) -> bool {
        self.hops.is_empty()
    }
}

impl fmt::Display for ConnectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, hop) in self.hops.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}. {hop}", i + 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hop(a: &str, m: &str, b: &str) -> Hop {
        Hop {
            from_actor: a.into(),
            movie: m.into(),
            to_actor: b.into(),
        }
    }

    #[test]
    fn extended_leaves_prefix_intact() {
        let base = ConnectionPath::empty().extended(hop("A", "m1", "B"));
        let left = base.extended(hop("B", "m2", "C"));
        let right = base.extended(hop("B", "m3", "D"));
        assert_eq!(base.len(), 1);
        assert_eq!(left.len(), 2);
        assert_eq!(right.hops()[1].to_actor, "D");
    }

    #[test]
    fn display_numbers_each_hop() {
        let path = ConnectionPath::from_hops(vec![hop("A", "m1", "B"), hop("B", "m2", "C")]);
        let text = path.to_string();
        assert_eq!(text, "1. A → 「m1」 → B\n2. B → 「m2」 → C");
    }

    #[test]
    fn serializes_as_plain_hop_list() {
        let path = ConnectionPath::from_hops(vec![hop("A", "m1", "B")]);
        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "from_actor": "A", "movie": "m1", "to_actor": "B" }])
        );
    }
}
