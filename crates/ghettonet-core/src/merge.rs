//! Multi-stage merge: deduplication and conflict resolution.
//!
//! Entries collected from several sources are reconciled into one
//! conflict-free set keyed by address. The engine needs its whole input
//! up front — date priority and conflict detection only work when every
//! candidate for a name is visible at once.
//!
//! Per name, an ordered strategy pipeline reduces the bucket of
//! candidates to a single winner: most recent date wins, equal addresses
//! collapse, and genuinely conflicting addresses either fail (strict) or
//! are narrated into the winner's comments (lenient).

use std::collections::HashMap;

use crate::comments;
use crate::entry::Entry;
use crate::error::{Error, Result};

/// Comment marker recording an address discarded by forced conflict
/// resolution.
const CONFLICT_MARKER: &str = "## CONFLICT:";

/// Controls whether unresolved conflicts fail hard or are narrated into
/// output comments.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeOptions {
    /// Fail with a described ambiguity instead of narrating conflicts.
    pub strict: bool,
}

impl MergeOptions {
    /// Options that fail hard on conflicting addresses.
    #[must_use]
    pub const fn strict() -> Self {
        Self { strict: true }
    }
}

/// One reduction stage: takes a bucket of singleton-name entries and the
/// strictness flag, returns the reduced bucket or a described error.
pub type MergeStrategy = fn(Vec<Entry>, bool) -> Result<Vec<Entry>>;

/// The default pipeline: date priority, then same-address collapse, then
/// forced conflict resolution.
pub const DEFAULT_STRATEGIES: &[MergeStrategy] = &[by_date, same_address, force];

/// An insertion-ordered string-keyed map. Iteration order over buckets
/// and recombined addresses is first-seen order, deliberately: hash-map
/// iteration would make output order depend on the hasher.
struct OrderedGroups<T> {
    index: HashMap<String, usize>,
    groups: Vec<(String, T)>,
}

impl<T: Default> OrderedGroups<T> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }

    fn entry(&mut self, key: &str) -> &mut T {
        let i = *self.index.entry(key.to_string()).or_insert_with(|| {
            self.groups.push((key.to_string(), T::default()));
            self.groups.len() - 1
        });
        &mut self.groups[i].1
    }
}

/// Combines entries so that no two share an address and no name maps to
/// two addresses, using the default strategy pipeline.
///
/// # Errors
///
/// Strict mode returns [`Error::AddressConflict`] when one name is
/// claimed by different addresses at equal date priority. A bucket left
/// unreduced by the pipeline is always [`Error::BucketNotReduced`].
pub fn merge(entries: Vec<Entry>, options: MergeOptions) -> Result<Vec<Entry>> {
    merge_with(entries, options, DEFAULT_STRATEGIES)
}

/// As [`merge`], with an ordered override of the reduction pipeline.
///
/// # Errors
///
/// See [`merge`]; strategy overrides may return their own errors.
pub fn merge_with(
    entries: Vec<Entry>,
    options: MergeOptions,
    strategies: &[MergeStrategy],
) -> Result<Vec<Entry>> {
    // Stage A: one bucket per name, singleton-name entries inside.
    let mut by_name: OrderedGroups<Vec<Entry>> = OrderedGroups::new();
    for entry in entries {
        let names: Vec<String> = entry
            .names
            .iter()
            .filter(|name| {
                // localhost and ipv6 names cause trouble in a hosts file
                // and should never be distributed
                let dropped = name.contains("localhost") || name.starts_with("ipv6-");
                if dropped {
                    tracing::debug!("Skipping {name}");
                }
                !dropped
            })
            .cloned()
            .collect();
        match names.as_slice() {
            [] => {}
            [name] if entry.names.len() == 1 => {
                // sole name: move the entry, no clone needed
                let name = name.clone();
                by_name.entry(&name).push(entry);
            }
            kept => {
                for name in kept {
                    by_name.entry(name).push(entry.with_single_name(name));
                }
            }
        }
    }

    // Stage B: reduce each bucket to one winner.
    let mut by_address: OrderedGroups<Option<Entry>> = OrderedGroups::new();
    for (name, mut bucket) in by_name.groups {
        for strategy in strategies {
            if bucket.len() > 1 {
                bucket = strategy(bucket, options.strict)?;
            }
        }
        if bucket.len() > 1 {
            return Err(Error::BucketNotReduced {
                name,
                remaining: bucket.len(),
            });
        }
        let Some(winner) = bucket.pop() else {
            continue;
        };

        // Stage C: recombine winners sharing a final address.
        match by_address.entry(&winner.address) {
            Some(combined) => {
                comments::extend(&mut combined.comments, &winner.comments);
                combined.names.push(name);
            }
            slot => *slot = Some(winner),
        }
    }

    Ok(by_address
        .groups
        .into_iter()
        .filter_map(|(_, entry)| entry)
        .collect())
}

/// Date priority: once any entry carries a date, only entries tied at
/// the maximum date survive. All-undated buckets pass through.
///
/// # Errors
///
/// Never fails; the signature is fixed by [`MergeStrategy`].
pub fn by_date(entries: Vec<Entry>, _strict: bool) -> Result<Vec<Entry>> {
    let Some(max) = entries
        .iter()
        .filter_map(|e| e.date.as_ref().map(|d| d.timestamp))
        .max()
    else {
        return Ok(entries);
    };
    let total = entries.len();
    let survivors: Vec<Entry> = entries
        .into_iter()
        .filter(|e| e.date.as_ref().map(|d| d.timestamp) == Some(max))
        .collect();
    if total > survivors.len() {
        tracing::debug!(
            "Discarded {} old entries for {}",
            total - survivors.len(),
            survivors[0].names[0]
        );
    }
    Ok(survivors)
}

/// Same-address collapse: survivors (now tied on date) group by address;
/// each group's lexicographically smallest member absorbs the others'
/// comments. One winner per distinct address, in address order.
///
/// # Errors
///
/// Never fails; the signature is fixed by [`MergeStrategy`].
pub fn same_address(mut entries: Vec<Entry>, _strict: bool) -> Result<Vec<Entry>> {
    entries.sort_by(|a, b| a.address.cmp(&b.address));
    let mut winners: Vec<Entry> = Vec::new();
    let mut known = comments::known_comments(&[]);
    for entry in entries {
        match winners.last_mut() {
            Some(winner) if winner.address == entry.address => {
                comments::extend_with(&mut winner.comments, &entry.comments, &mut known);
                tracing::debug!(
                    "Merged entry with address {} for {}",
                    winner.address,
                    winner.names[0]
                );
            }
            _ => {
                known = comments::known_comments(&entry.comments);
                winners.push(entry);
            }
        }
    }
    Ok(winners)
}

/// Forced conflict resolution: more than one distinct address claiming
/// the same name at equal priority. Strict mode fails; lenient mode
/// keeps the first-listed winner and records each discarded address as a
/// `## CONFLICT:` comment, de-duplicated so re-merging already-narrated
/// output changes nothing.
///
/// # Errors
///
/// Returns [`Error::AddressConflict`] in strict mode.
pub fn force(entries: Vec<Entry>, strict: bool) -> Result<Vec<Entry>> {
    let mut entries = entries.into_iter();
    let Some(mut winner) = entries.next() else {
        return Ok(Vec::new());
    };
    if strict {
        let mut addresses = vec![winner.address.clone()];
        addresses.extend(entries.map(|e| e.address));
        return Err(Error::AddressConflict {
            name: winner.names[0].clone(),
            addresses,
        });
    }
    let mut known = comments::known_comments(&winner.comments);
    for other in entries {
        tracing::warn!(
            "Discarding {} as conflict for {}",
            other.address,
            winner.names[0]
        );
        comments::extend_with(&mut winner.comments, &other.comments, &mut known);
        let marker = format!("{CONFLICT_MARKER} {}", other.address);
        if known.insert(comments::normalized(&marker)) {
            winner.comments.push(marker);
        }
    }
    Ok(vec![winner])
}
