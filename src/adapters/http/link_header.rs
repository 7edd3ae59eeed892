//! RFC 8288 `Link` header parsing, limited to what pagination needs.

/// Target URL of the first `rel="next"` link in a `Link` header value.
///
/// `<https://x/api/v1/directory?offset=10>; rel="next", <https://x/...>; rel="prev"`
pub fn next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|part| {
        let mut params = part.split(';');
        let target = params.next()?.trim();
        let target = target.strip_prefix('<')?.strip_suffix('>')?;
        let is_next = params.any(|p| {
            let Some((name, value)) = p.split_once('=') else {
                return false;
            };
            name.trim().eq_ignore_ascii_case("rel")
                && value
                    .trim()
                    .trim_matches('"')
                    .split_whitespace()
                    .any(|rel| rel.eq_ignore_ascii_case("next"))
        });
        is_next.then(|| target.to_string())
    })
}
