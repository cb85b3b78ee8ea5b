//! Substring filter for the list viewer.

/// One entry that matched a filter query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rank {
    /// Position of the entry in the unfiltered list
    pub index: usize,

    /// Character offsets of the matched span inside the filter target
    pub matched: Vec<usize>,
}

impl Rank {
    /// Rank for an entry shown without any filter applied
    pub fn unfiltered(index: usize) -> Self {
        Self {
            index,
            matched: Vec::new(),
        }
    }

    /// Offset of the first matched character, if any
    pub fn first_match(&self) -> Option<usize> {
        self.matched.first().copied()
    }
}

/// Filter targets by plain substring match
///
/// **Public** - main entry point for filtering
///
/// # Arguments
/// * `query` - Substring to look for
/// * `targets` - Filter text of every entry, in list order
///
/// # Returns
/// Matching entries in list order. Each rank covers exactly the first
/// occurrence of `query`, `query.chars().count()` characters long. An empty
/// query matches everything with no offsets.
pub fn filter<S: AsRef<str>>(query: &str, targets: &[S]) -> Vec<Rank> {
    let span = query.chars().count();

    targets
        .iter()
        .enumerate()
        .filter_map(|(index, target)| {
            let target = target.as_ref();
            let byte_start = target.find(query)?;
            let start = target[..byte_start].chars().count();

            Some(Rank {
                index,
                matched: (start..start + span).collect(),
            })
        })
        .collect()
}
