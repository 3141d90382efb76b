//! URL slug generation

/// Slug used when a title has no usable characters at all
const FALLBACK_SLUG: &str = "article";

/// Derives a URL-safe slug from a title
///
/// Lowercases, folds common accented Latin letters to ASCII, collapses every
/// run of other characters into one hyphen and trims hyphens at both ends.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.chars().flat_map(char::to_lowercase) {
        let folded = if c.is_ascii_alphanumeric() {
            Some(FoldedChar::Ascii(c))
        } else {
            fold_latin(c).map(FoldedChar::Str)
        };

        match folded {
            Some(folded) => {
                if pending_hyphen && !slug.is_empty() {
                    slug.push('-');
                }
                pending_hyphen = false;
                match folded {
                    FoldedChar::Ascii(c) => slug.push(c),
                    FoldedChar::Str(s) => slug.push_str(s),
                }
            }
            None => pending_hyphen = true,
        }
    }

    slug
}

enum FoldedChar {
    Ascii(char),
    Str(&'static str),
}

fn fold_latin(c: char) -> Option<&'static str> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'æ' => "ae",
        'ç' | 'ć' | 'č' => "c",
        'ď' | 'đ' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => "e",
        'ğ' => "g",
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' | 'ı' => "i",
        'ł' | 'ľ' | 'ĺ' => "l",
        'ñ' | 'ń' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ő' | 'ø' | 'ō' => "o",
        'œ' => "oe",
        'ŕ' | 'ř' => "r",
        'ś' | 'š' | 'ş' | 'ș' => "s",
        'ß' => "ss",
        'ť' | 'ţ' | 'ț' => "t",
        'ù' | 'ú' | 'û' | 'ü' | 'ű' | 'ū' | 'ů' | 'ų' => "u",
        'ý' | 'ÿ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        _ => return None,
    };
    Some(folded)
}

/// Returns a slug for `title` that `exists` reports as free
///
/// Tries the base slug first, then `base-1`, `base-2`, ... until a free
/// candidate is found. `exists` is usually a database lookup, so its errors
/// are passed through untouched.
pub fn generate_unique_slug<F, E>(title: &str, mut exists: F) -> Result<String, E>
where
    F: FnMut(&str) -> Result<bool, E>,
{
    let mut base = slugify(title);
    if base.is_empty() {
        base = FALLBACK_SLUG.to_string();
    }

    if !exists(&base)? {
        return Ok(base);
    }

    let mut counter: u64 = 1;
    loop {
        let candidate = format!("{}-{}", base, counter);
        if !exists(&candidate)? {
            return Ok(candidate);
        }
        counter += 1;
    }
}
