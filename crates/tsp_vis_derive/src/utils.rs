use quote::quote;
use syn::{Attribute, Expr, ExprLit, Lit, Meta, Path, Type, TypePath};

pub fn to_kebab_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for (idx, ch) in s.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if idx != 0 {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// First line of the `///` doc comment, trimmed.
pub fn doc_summary(attrs: &[Attribute]) -> Option<String> {
    attrs.iter().find_map(|attr| {
        if !attr.path().is_ident("doc") {
            return None;
        }
        let Meta::NameValue(nv) = &attr.meta else {
            return None;
        };
        let Expr::Lit(ExprLit {
            lit: Lit::Str(lit), ..
        }) = &nv.value
        else {
            return None;
        };
        let line = lit.value().trim().trim_end_matches('.').to_string();
        (!line.is_empty()).then_some(line)
    })
}

pub fn is_bool(ty: &Type) -> bool {
    matches!(ty, Type::Path(TypePath { path, .. }) if path.is_ident("bool"))
}

pub fn build_cli_parse_expr(ty: &Type, parse_with: Option<&Path>) -> proc_macro2::TokenStream {
    if let Some(parse_with) = parse_with {
        quote! { #parse_with(&raw)? }
    } else {
        quote! {
            raw.trim().parse::<#ty>()
                .map_err(|e| crate::Error::invalid_input(format!(
                    "Invalid value for --{name}: {raw} ({e})"
                )))?
        }
    }
}

/// Left column of a usage line, e.g. `--points <usize>`.
pub fn usage_left(long: &str, value: &str, flag: bool) -> String {
    if flag {
        format!("--{long}[=<bool>] | --no-{long}")
    } else {
        format!("--{long} {value}")
    }
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::{doc_summary, is_bool, to_kebab_case, usage_left};

    #[test]
    fn to_kebab_case_inserts_dashes_before_ascii_uppercase() {
        assert_eq!(to_kebab_case("NearestNeighbor"), "nearest-neighbor");
        assert_eq!(to_kebab_case("already-kebab"), "already-kebab");
        assert_eq!(to_kebab_case("X"), "x");
    }

    #[test]
    fn doc_summary_takes_first_non_empty_doc_line() {
        let field: syn::Field = parse_quote! {
            /// Number of points to sample.
            /// Second line is ignored.
            pub points: usize
        };
        assert_eq!(
            doc_summary(&field.attrs).as_deref(),
            Some("Number of points to sample")
        );

        let bare: syn::Field = parse_quote!(pub points: usize);
        assert!(doc_summary(&bare.attrs).is_none());
    }

    #[test]
    fn is_bool_only_matches_plain_bool() {
        let b: syn::Type = parse_quote!(bool);
        let opt: syn::Type = parse_quote!(Option<bool>);
        let num: syn::Type = parse_quote!(u64);
        assert!(is_bool(&b));
        assert!(!is_bool(&opt));
        assert!(!is_bool(&num));
    }

    #[test]
    fn usage_left_formats_values_and_flags() {
        assert_eq!(usage_left("points", "<usize>", false), "--points <usize>");
        assert_eq!(
            usage_left("random-start", "", true),
            "--random-start[=<bool>] | --no-random-start"
        );
    }
}
