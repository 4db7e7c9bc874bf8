//! Table formatting utilities for CLI output.

use comfy_table::{ContentArrangement, Table, presets};
use xmsg::{ContextKey, Token};

/// Format derived tokens as an ASCII table.
pub fn format_token_table(tokens: &[Token]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Token", "Context", "Rule keys", "Map keys"]);

    for token in tokens {
        let context: Vec<&str> = token
            .context_keys
            .iter()
            .copied()
            .map(ContextKey::as_str)
            .collect();
        table.add_row(vec![
            token.full_name.clone(),
            context.join(", "),
            token.rule_keys.join(", "),
            token.params.join(", "),
        ]);
    }

    table
}
