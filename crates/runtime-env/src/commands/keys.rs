//! Keys command - Lists known key names.

use domain::EnvKey;

/// Execute the keys command
pub fn execute() {
    for line in key_lines() {
        println!("{}", line);
    }
}

fn key_lines() -> Vec<String> {
    EnvKey::ALL
        .into_iter()
        .map(|key| {
            let note = if key.is_secret() { " (secret)" } else { "" };
            format!("{}{}", key, note)
        })
        .collect()
}
