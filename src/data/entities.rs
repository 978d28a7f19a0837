//! XML character entities found in documentation comments

use phf::phf_map;

/// The five predefined XML entities
pub static XML_ENTITIES: phf::Map<&'static str, char> = phf_map! {
    "lt" => '<',
    "gt" => '>',
    "amp" => '&',
    "quot" => '"',
    "apos" => '\'',
};

/// Resolve the body of an entity reference (`lt`, `#60`, `#x3C`)
pub fn resolve_entity(name: &str) -> Option<char> {
    if let Some(c) = XML_ENTITIES.get(name) {
        return Some(*c);
    }
    let code = name.strip_prefix('#')?;
    let value = match code.strip_prefix('x').or_else(|| code.strip_prefix('X')) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => code.parse::<u32>().ok()?,
    };
    char::from_u32(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named() {
        assert_eq!(resolve_entity("lt"), Some('<'));
        assert_eq!(resolve_entity("nbsp"), None);
    }

    #[test]
    fn test_numeric() {
        assert_eq!(resolve_entity("#60"), Some('<'));
        assert_eq!(resolve_entity("#x3C"), Some('<'));
        assert_eq!(resolve_entity("#xZZ"), None);
    }
}
