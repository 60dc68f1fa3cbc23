use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;

/// Raw query parameters as they arrive on the wire. Parsed by hand so a
/// malformed value yields the API's own 400 body instead of the framework's.
#[derive(Debug, Default, Deserialize)]
pub struct RawPageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct PageParams {
    pub page: i64,
    pub limit: i64,
}

impl RawPageQuery {
    pub fn parse(self) -> Result<PageParams, String> {
        let page = match self.page.as_deref() {
            None | Some("") => 1,
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| format!("page must be an integer, got '{raw}'"))?,
        };
        if page < 1 {
            return Err("page must be greater than 0".into());
        }

        let limit = match self.limit.as_deref() {
            None | Some("") => DEFAULT_LIMIT,
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| format!("limit must be an integer, got '{raw}'"))?,
        };
        if limit < 1 {
            return Err("limit must be greater than 0".into());
        }
        if limit > MAX_LIMIT {
            return Err(format!("limit must not exceed {MAX_LIMIT}"));
        }

        Ok(PageParams { page, limit })
    }
}

impl PageParams {
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }

    pub fn meta(&self, total: i64) -> ListMeta {
        ListMeta {
            total,
            page: self.page,
            limit: self.limit,
            has_more: self.page * self.limit < total,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListMeta {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(page: Option<&str>, limit: Option<&str>) -> RawPageQuery {
        RawPageQuery {
            page: page.map(str::to_string),
            limit: limit.map(str::to_string),
        }
    }

    #[test]
    fn defaults_apply_when_absent() {
        let p = raw(None, None).parse().expect("defaults should parse");
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, DEFAULT_LIMIT);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn rejects_zero_page_and_oversized_limit() {
        assert!(raw(Some("0"), None).parse().is_err());
        assert!(raw(None, Some("101")).parse().is_err());
        assert!(raw(Some("abc"), None).parse().is_err());
    }

    #[test]
    fn offset_and_has_more() {
        let p = raw(Some("3"), Some("6")).parse().expect("should parse");
        assert_eq!(p.offset(), 12);
        let meta = p.meta(19);
        assert!(meta.has_more);
        let meta = p.meta(18);
        assert!(!meta.has_more);
    }
}
