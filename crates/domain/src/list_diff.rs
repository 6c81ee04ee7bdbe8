use crate::{reminder::Reminder, shared::entity::ID};
use std::collections::HashMap;

/// Changes needed to turn one rendered list of `Reminder`s into the next.
///
/// Two entries are the *same item* when their ids are equal and have the
/// *same content* when every field is equal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReminderListDiff {
    /// Ids only present in the new list
    pub inserted: Vec<ID>,
    /// Ids only present in the old list
    pub removed: Vec<ID>,
    /// Ids present in both lists whose content differs
    pub changed: Vec<ID>,
    /// Ids present in both lists that have to move for the order to match.
    /// This is the smallest such set.
    pub moved: Vec<ID>,
}

impl ReminderListDiff {
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty()
            && self.removed.is_empty()
            && self.changed.is_empty()
            && self.moved.is_empty()
    }
}

pub fn is_same_item(a: &Reminder, b: &Reminder) -> bool {
    a.id == b.id
}

pub fn is_same_content(a: &Reminder, b: &Reminder) -> bool {
    a == b
}

pub fn diff_reminders(old: &[Reminder], new: &[Reminder]) -> ReminderListDiff {
    let old_pos: HashMap<&ID, usize> = old.iter().enumerate().map(|(i, r)| (&r.id, i)).collect();
    let new_ids: HashMap<&ID, &Reminder> = new.iter().map(|r| (&r.id, r)).collect();

    let removed = old
        .iter()
        .filter(|r| !new_ids.contains_key(&r.id))
        .map(|r| r.id.clone())
        .collect();

    let mut diff = ReminderListDiff {
        removed,
        ..Default::default()
    };

    // Old positions of the kept items, in new list order
    let mut kept = Vec::new();
    for reminder in new {
        match old_pos.get(&reminder.id) {
            Some(&i) => {
                if !is_same_content(&old[i], reminder) {
                    diff.changed.push(reminder.id.clone());
                }
                kept.push((i, &reminder.id));
            }
            None => diff.inserted.push(reminder.id.clone()),
        }
    }

    let stay = longest_increasing_run(&kept.iter().map(|(i, _)| *i).collect::<Vec<_>>());
    diff.moved = kept
        .iter()
        .enumerate()
        .filter(|(k, _)| !stay[*k])
        .map(|(_, (_, id))| (*id).clone())
        .collect();

    diff
}

/// Marks the members of one longest strictly increasing subsequence
fn longest_increasing_run(values: &[usize]) -> Vec<bool> {
    // tails[l] = index into `values` of the smallest tail of a run of length l + 1
    let mut tails: Vec<usize> = Vec::new();
    let mut prev: Vec<Option<usize>> = vec![None; values.len()];

    for (k, v) in values.iter().enumerate() {
        let len = tails.partition_point(|&t| values[t] < *v);
        if len > 0 {
            prev[k] = Some(tails[len - 1]);
        }
        if len == tails.len() {
            tails.push(k);
        } else {
            tails[len] = k;
        }
    }

    let mut members = vec![false; values.len()];
    let mut cursor = tails.last().copied();
    while let Some(k) = cursor {
        members[k] = true;
        cursor = prev[k];
    }
    members
}
