//! Whitespace-delimited transaction files.
//!
//! One transaction per line, one item id per token. Lines that are empty or
//! hold only whitespace are skipped and do not consume a transaction index.

/// Parses the full text of a transaction file.
///
/// # Arguments
///
/// * `text` - File contents
/// * `source_name` - Used in error messages only
///
/// # Returns
///
/// One vector of original item ids per non-blank line, tokens in file order.
///
/// # Errors
///
/// Returns an error naming the line (1-based) and token when a token is not
/// a non-negative integer that fits in 32 bits.
///
/// # Examples
///
/// ```
/// # use gapmine::dataset::parser::parse_transactions;
/// let transactions = parse_transactions("1 2 3\n\n2  3\n", "inline").unwrap();
/// assert_eq!(transactions, vec![vec![1, 2, 3], vec![2, 3]]);
/// ```
pub fn parse_transactions(
    text: &str,
    source_name: &str,
) -> Result<Vec<Vec<u32>>, Box<dyn std::error::Error + Send + Sync>> {
    let mut transactions = Vec::new();
    for (line_index, line) in text.lines().enumerate() {
        let mut items = Vec::new();
        for token in line.split_whitespace() {
            let item = token.parse::<u32>().map_err(|_| {
                format!(
                    "Invalid item '{}' on line {} of {}",
                    token,
                    line_index + 1,
                    source_name
                )
            })?;
            items.push(item);
        }
        if !items.is_empty() {
            transactions.push(items);
        }
    }
    Ok(transactions)
}

/// Parses raw bytes, rejecting content that is not UTF-8.
pub fn parse_transaction_bytes(
    bytes: &[u8],
    source_name: &str,
) -> Result<Vec<Vec<u32>>, Box<dyn std::error::Error + Send + Sync>> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| format!("{} is not valid UTF-8: {}", source_name, e))?;
    parse_transactions(text, source_name)
}
