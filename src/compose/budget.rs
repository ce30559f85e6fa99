/// Discord's hard limit on the combined length of a message with embeds
pub const DISCORD_MESSAGE_LIMIT: usize = 4096;

/// Default budget for all section bodies (leaves room for titles and the header)
pub const MESSAGE_MAX_LENGTH: usize = 4000;

// Compile-time guarantee: the default budget stays under Discord's limit
const _: () = assert!(MESSAGE_MAX_LENGTH < DISCORD_MESSAGE_LIMIT);

/// Render the configured footer as it is appended to a cut section: blank line, then bold.
pub fn overflow_notice(footer: &str) -> String {
    format!("\n\n**{}**", footer)
}

/// Character allowance for each section body, in the same order as `raw_lengths`.
///
/// When everything fits, every section may use the whole budget (Discord validates
/// the combined payload, not each embed). Otherwise the budget is split evenly.
pub fn allocate(raw_lengths: &[usize], total_budget: usize) -> Vec<usize> {
    if raw_lengths.is_empty() {
        return Vec::new();
    }

    let sum: usize = raw_lengths.iter().sum();
    let per_section = if sum < total_budget {
        total_budget
    } else {
        total_budget / raw_lengths.len()
    };

    vec![per_section; raw_lengths.len()]
}

/// Cut `body` to at most `allowed` characters without splitting a line, then append `notice`.
///
/// The notice is appended even when nothing had to be cut. Callers that only want it on
/// real truncation must check the length first. The cut lands on the last line break at or
/// before character `allowed`; with no such break the body is cut hard at `allowed`.
pub fn truncate_on_newline(body: &str, allowed: usize, notice: &str) -> String {
    let cut = match body.char_indices().nth(allowed) {
        Some((byte_idx, _)) => byte_idx,
        None => return format!("{}{}", body, notice),
    };

    let end = if body[cut..].starts_with('\n') {
        cut
    } else {
        body[..cut].rfind('\n').unwrap_or(cut)
    };
    format!("{}{}", &body[..end], notice)
}
