//! Capability name probing.
//!
//! The calculation backend's naming is not fixed, so a requested name is
//! resolved against the catalog under several spellings. The first spelling
//! present in the catalog wins.

use std::sync::Arc;

use super::catalog::Catalog;
use super::Capability;

/// Returns the spellings tried for `name`, in resolution order.
///
/// Order: verbatim, lowercase, uppercase, capitalized, `All` prefix, `Get`
/// prefix. Capitalized means the first character upper-cased and the rest
/// lower-cased (`TithiAtTime` becomes `Tithiattime`).
pub fn candidate_names(name: &str) -> Vec<String> {
    vec![
        name.to_string(),
        name.to_lowercase(),
        name.to_uppercase(),
        capitalize(name),
        format!("All{}", name),
        format!("Get{}", name),
    ]
}

/// Resolves `name` to the first matching catalog entry.
///
/// Returns the spelling that matched alongside the capability, or `None`
/// when no spelling is registered.
pub fn resolve<'a>(catalog: &'a Catalog, name: &str) -> Option<(String, &'a Arc<dyn Capability>)> {
    candidate_names(name)
        .into_iter()
        .find_map(|candidate| catalog.get(&candidate).map(|cap| (candidate, cap)))
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}
