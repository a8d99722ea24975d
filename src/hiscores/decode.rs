// src/hiscores/decode.rs

use thiserror::Error;

use super::layout::{FieldGroup, Layout};
use super::types::{ActivityEntry, BossEntry, Group, SkillEntry, Snapshot, UNRANKED};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("expected {expected} tokens for layout {version}, found {found}")]
    TokenCount { expected: usize, found: usize, version: String },

    #[error("token {index} is not an integer: {token:?}")]
    InvalidToken { index: usize, token: String },
}

/// Split a feed into tokens. Lines and commas are both separators;
/// surrounding whitespace (including a trailing newline) is dropped.
pub fn tokenize(raw: &str) -> Vec<&str> {
    raw.trim().split(['\n', ',']).map(str::trim).collect()
}

/// Decode with the built-in layout.
pub fn decode(raw: &str) -> Result<Snapshot, FeedError> {
    decode_with(raw, &Layout::default())
}

/// Decode an index_lite feed. Pure; the token count is checked against the
/// layout before anything is read, so a short or long feed never yields a
/// partially filled snapshot. `-1` passes through untouched.
pub fn decode_with(raw: &str, layout: &Layout) -> Result<Snapshot, FeedError> {
    let tokens = tokenize(raw);
    let expected = layout.expected_tokens();
    if tokens.len() != expected {
        return Err(FeedError::TokenCount {
            expected,
            found: tokens.len(),
            version: layout.version.clone(),
        });
    }

    let values = tokens
        .iter()
        .enumerate()
        .map(|(index, t)| {
            t.parse::<i64>()
                .map_err(|_| FeedError::InvalidToken { index, token: s!(*t) })
        })
        .collect::<Result<Vec<i64>, _>>()?;

    let [overall, skills, activities, bosses] = layout.groups();

    let o = overall.offset;
    let overall = SkillEntry { rank: values[o], level: values[o + 1], xp: values[o + 2] };

    let mut snap = Snapshot {
        overall,
        skills: Group::with_capacity(skills.names.len()),
        activities: Group::with_capacity(activities.names.len()),
        bosses: Group::with_capacity(bosses.names.len()),
    };

    for (name, v) in entries(skills, &values) {
        snap.skills.push(name, SkillEntry { rank: v[0], level: v[1], xp: v[2] });
    }
    for (name, v) in entries(activities, &values) {
        snap.activities.push(name, ActivityEntry { rank: v[0], value: v[1] });
    }
    for (name, v) in entries(bosses, &values) {
        snap.bosses.push(name, BossEntry { rank: v[0], kc: v[1] });
    }

    Ok(snap)
}

fn entries<'a>(
    group: FieldGroup<'a>,
    values: &'a [i64],
) -> impl Iterator<Item = (&'a str, &'a [i64])> + 'a {
    let slice = &values[group.offset..group.offset + group.token_len()];
    group
        .names
        .iter()
        .map(String::as_str)
        .zip(slice.chunks_exact(group.width()))
}

/// Inverse of [`decode_with`]: one line per entry, comma separated, in
/// layout order. Entries the snapshot lacks are written as unranked.
pub fn encode(snap: &Snapshot, layout: &Layout) -> String {
    let [_, skills, activities, bosses] = layout.groups();
    let unranked_skill = SkillEntry { rank: UNRANKED, level: UNRANKED, xp: UNRANKED };
    let mut out = String::with_capacity(layout.expected_tokens() * 8);

    let mut line = |fields: &[i64]| {
        let parts: Vec<String> = fields.iter().map(i64::to_string).collect();
        out.push_str(&parts.join(","));
        out.push('\n');
    };

    let o = snap.overall;
    line(&[o.rank, o.level, o.xp]);

    for name in skills.names {
        let e = snap.skills.get(name).copied().unwrap_or(unranked_skill);
        line(&[e.rank, e.level, e.xp]);
    }
    for name in activities.names {
        let e = snap.activities.get(name).copied()
            .unwrap_or(ActivityEntry { rank: UNRANKED, value: UNRANKED });
        line(&[e.rank, e.value]);
    }
    for name in bosses.names {
        let e = snap.bosses.get(name).copied()
            .unwrap_or(BossEntry { rank: UNRANKED, kc: UNRANKED });
        line(&[e.rank, e.kc]);
    }

    out
}
