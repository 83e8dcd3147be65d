//! Derive macro for `fleen_base_shared::Validate`.
//!
//! Field rules: `non_empty`, `range(min, max)`, `custom = "path"`, `email`,
//! `phone`, `password`, `year`, `number`, `boolean`, `one_of(..)`,
//! `enum_name = "Type"`, `enum_ordinal(values = [..])`, `date`, `date_time`
//! and `future_date`. String rules accept an optional `message = ".."`.
//!
//! Container rules: `date_range(start, end)` and `field_match(first, second)`.
//! Their violation is reported against the first named field.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::{ToTokens, quote};
use std::collections::BTreeMap;
use syn::meta::ParseNestedMeta;
use syn::{
    Attribute, Data, DeriveInput, Expr, ExprArray, Fields, GenericArgument, Ident, Lit, LitStr,
    Path, PathArguments, Type,
};

/// Derive `fleen_base_shared::Validate` with field and container checks.
#[proc_macro_derive(Validate, attributes(validate))]
pub fn derive_validate(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    match expand_validate(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

struct FieldInfo {
    ident: Ident,
    name: String,
    is_option: bool,
}

fn expand_validate(input: &DeriveInput) -> Result<proc_macro2::TokenStream, syn::Error> {
    let container = parse_container(&input.attrs)?;
    let error_ty = &container.error_ty;
    let Data::Struct(struct_data) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "Validate can only be derived for structs",
        ));
    };

    let fields = match &struct_data.fields {
        Fields::Named(fields) => &fields.named,
        _ => {
            return Err(syn::Error::new_spanned(
                &struct_data.fields,
                "Validate requires named fields",
            ));
        },
    };

    let mut checks = Vec::new();
    let mut known = BTreeMap::new();
    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let (field_name, validators) = parse_field_validators(&field.attrs, ident)?;
        let (is_option, inner_ty) = unwrap_option(&field.ty);
        known.insert(
            ident.to_string(),
            FieldInfo {
                ident: ident.clone(),
                name: field_name.clone(),
                is_option,
            },
        );
        for validator in validators {
            let target = Target {
                ident,
                field_name: &field_name,
                ty: inner_ty,
                is_option,
                error_ty,
            };
            let check = match validator {
                Validator::NonEmpty => expand_non_empty(&target)?,
                Validator::Range { min, max } => expand_range(&target, &min, &max)?,
                Validator::Custom(path) => expand_custom(ident, &path, is_option),
                Validator::Text { rule, message } => {
                    expand_text_rule(&target, &rule, message.as_ref())?
                },
            };
            checks.push(check);
        }
    }

    for rule in &container.rules {
        checks.push(expand_container_rule(rule, &known, error_ty)?);
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics fleen_base_shared::Validate for #name #ty_generics #where_clause {
            type Error = #error_ty;

            fn validate(&self) -> ::core::result::Result<(), ::std::vec::Vec<Self::Error>> {
                #[allow(unused_mut, reason = "structs without rules never push")]
                let mut violations: ::std::vec::Vec<Self::Error> = ::std::vec::Vec::new();
                #(#checks)*
                if violations.is_empty() {
                    ::core::result::Result::Ok(())
                } else {
                    ::core::result::Result::Err(violations)
                }
            }
        }
    })
}

// =============================================================================
// ATTRIBUTE PARSING
// =============================================================================

struct Container {
    error_ty: Path,
    rules: Vec<ContainerRule>,
}

enum ContainerRule {
    DateRange {
        start: LitStr,
        end: LitStr,
        message: Option<LitStr>,
    },
    FieldMatch {
        first: LitStr,
        second: LitStr,
        message: Option<LitStr>,
    },
}

fn parse_container(attrs: &[Attribute]) -> Result<Container, syn::Error> {
    let mut error_ty: Option<Path> = None;
    let mut rules = Vec::new();
    for attr in attrs {
        if !attr.path().is_ident("validate") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("error") {
                let value: LitStr = meta.value()?.parse()?;
                let parsed: Path = value.parse()?;
                if error_ty.is_some() {
                    return Err(meta.error("duplicate validate(error = ...)"));
                }
                error_ty = Some(parsed);
                return Ok(());
            }
            if meta.path.is_ident("date_range") {
                let (start, end, message) = parse_field_pair(&meta, "start", "end")?;
                rules.push(ContainerRule::DateRange {
                    start,
                    end,
                    message,
                });
                return Ok(());
            }
            if meta.path.is_ident("field_match") {
                let (first, second, message) = parse_field_pair(&meta, "first", "second")?;
                rules.push(ContainerRule::FieldMatch {
                    first,
                    second,
                    message,
                });
                return Ok(());
            }
            Err(meta.error("unsupported validate attribute on container"))
        })?;
    }

    let error_ty = error_ty.ok_or_else(|| {
        syn::Error::new(
            Span::call_site(),
            "missing #[validate(error = \"path\")] on struct",
        )
    })?;
    Ok(Container { error_ty, rules })
}

fn parse_field_pair(
    meta: &ParseNestedMeta<'_>,
    first_key: &str,
    second_key: &str,
) -> Result<(LitStr, LitStr, Option<LitStr>), syn::Error> {
    let mut first = None;
    let mut second = None;
    let mut message = None;
    meta.parse_nested_meta(|nested| {
        if nested.path.is_ident(first_key) {
            first = Some(nested.value()?.parse::<LitStr>()?);
            return Ok(());
        }
        if nested.path.is_ident(second_key) {
            second = Some(nested.value()?.parse::<LitStr>()?);
            return Ok(());
        }
        if nested.path.is_ident("message") {
            message = Some(nested.value()?.parse::<LitStr>()?);
            return Ok(());
        }
        Err(nested.error("unsupported field pair option"))
    })?;
    match (first, second) {
        (Some(first), Some(second)) => Ok((first, second, message)),
        _ => Err(meta.error(format!("requires {first_key} and {second_key}"))),
    }
}

enum Validator {
    NonEmpty,
    Range { min: Lit, max: Lit },
    Custom(Path),
    Text {
        rule: TextRule,
        message: Option<LitStr>,
    },
}

enum TextRule {
    Email,
    Phone,
    Password,
    Year,
    Number,
    Boolean,
    OneOf {
        values: Vec<LitStr>,
        enum_type: Option<Path>,
        ignore_case: bool,
    },
    EnumName(Path),
    EnumOrdinal(Vec<i64>),
    Date(Option<LitStr>),
    DateTime(Option<LitStr>),
    FutureDate {
        date_only: bool,
    },
}

fn parse_field_validators(
    attrs: &[Attribute],
    ident: &Ident,
) -> Result<(String, Vec<Validator>), syn::Error> {
    let mut validators = Vec::new();
    let mut field_name_override: Option<String> = None;
    for attr in attrs {
        if !attr.path().is_ident("validate") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("field") {
                let value: LitStr = meta.value()?.parse()?;
                if field_name_override.is_some() {
                    return Err(meta.error("duplicate validate(field = ...)"));
                }
                field_name_override = Some(value.value());
                return Ok(());
            }
            if meta.path.is_ident("non_empty") {
                validators.push(Validator::NonEmpty);
                return Ok(());
            }
            if meta.path.is_ident("custom") {
                let value: LitStr = meta.value()?.parse()?;
                let path: Path = value.parse()?;
                validators.push(Validator::Custom(path));
                return Ok(());
            }
            if meta.path.is_ident("range") {
                validators.push(parse_range(&meta)?);
                return Ok(());
            }
            if let Some(rule) = simple_rule(&meta.path) {
                let message = parse_rule_options(&meta, |_| Ok(false))?;
                validators.push(Validator::Text { rule, message });
                return Ok(());
            }
            if meta.path.is_ident("date") || meta.path.is_ident("date_time") {
                let mut pattern = None;
                let message = parse_rule_options(&meta, |nested| {
                    if nested.path.is_ident("pattern") {
                        pattern = Some(nested.value()?.parse::<LitStr>()?);
                        return Ok(true);
                    }
                    Ok(false)
                })?;
                let rule = if meta.path.is_ident("date") {
                    TextRule::Date(pattern)
                } else {
                    TextRule::DateTime(pattern)
                };
                validators.push(Validator::Text { rule, message });
                return Ok(());
            }
            if meta.path.is_ident("future_date") {
                let mut date_only = false;
                let message = parse_rule_options(&meta, |nested| {
                    if nested.path.is_ident("date_only") {
                        date_only = true;
                        return Ok(true);
                    }
                    Ok(false)
                })?;
                validators.push(Validator::Text {
                    rule: TextRule::FutureDate { date_only },
                    message,
                });
                return Ok(());
            }
            if meta.path.is_ident("one_of") {
                let mut values = Vec::new();
                let mut enum_type = None;
                let mut ignore_case = false;
                let message = parse_rule_options(&meta, |nested| {
                    if nested.path.is_ident("values") {
                        values = parse_str_array(nested)?;
                        return Ok(true);
                    }
                    if nested.path.is_ident("enum_type") {
                        let value: LitStr = nested.value()?.parse()?;
                        enum_type = Some(value.parse::<Path>()?);
                        return Ok(true);
                    }
                    if nested.path.is_ident("ignore_case") {
                        ignore_case = true;
                        return Ok(true);
                    }
                    Ok(false)
                })?;
                if values.is_empty() && enum_type.is_none() {
                    return Err(meta.error("one_of requires values or enum_type"));
                }
                validators.push(Validator::Text {
                    rule: TextRule::OneOf {
                        values,
                        enum_type,
                        ignore_case,
                    },
                    message,
                });
                return Ok(());
            }
            if meta.path.is_ident("enum_name") {
                let value: LitStr = meta.value()?.parse()?;
                validators.push(Validator::Text {
                    rule: TextRule::EnumName(value.parse()?),
                    message: None,
                });
                return Ok(());
            }
            if meta.path.is_ident("enum_ordinal") {
                let mut accepted = Vec::new();
                let message = parse_rule_options(&meta, |nested| {
                    if nested.path.is_ident("values") {
                        accepted = parse_int_array(nested)?;
                        return Ok(true);
                    }
                    Ok(false)
                })?;
                validators.push(Validator::Text {
                    rule: TextRule::EnumOrdinal(accepted),
                    message,
                });
                return Ok(());
            }
            Err(meta.error("unsupported validate attribute on field"))
        })?;
    }
    let name = field_name_override.unwrap_or_else(|| ident.to_string());
    Ok((name, validators))
}

fn parse_range(meta: &ParseNestedMeta<'_>) -> Result<Validator, syn::Error> {
    let mut min: Option<Lit> = None;
    let mut max: Option<Lit> = None;
    meta.parse_nested_meta(|nested| {
        if nested.path.is_ident("min") {
            min = Some(nested.value()?.parse()?);
            return Ok(());
        }
        if nested.path.is_ident("max") {
            max = Some(nested.value()?.parse()?);
            return Ok(());
        }
        Err(nested.error("unsupported range attribute"))
    })?;
    let Some(min) = min else {
        return Err(meta.error("range requires min"));
    };
    let Some(max) = max else {
        return Err(meta.error("range requires max"));
    };
    Ok(Validator::Range { min, max })
}

fn simple_rule(path: &Path) -> Option<TextRule> {
    let ident = path.get_ident()?.to_string();
    match ident.as_str() {
        "email" => Some(TextRule::Email),
        "phone" => Some(TextRule::Phone),
        "password" => Some(TextRule::Password),
        "year" => Some(TextRule::Year),
        "number" => Some(TextRule::Number),
        "boolean" => Some(TextRule::Boolean),
        _ => None,
    }
}

/// Parse `rule` or `rule(message = "..", extra..)`; `option` claims the extras.
fn parse_rule_options<F>(
    meta: &ParseNestedMeta<'_>,
    mut option: F,
) -> Result<Option<LitStr>, syn::Error>
where
    F: FnMut(&ParseNestedMeta<'_>) -> Result<bool, syn::Error>,
{
    let mut message = None;
    if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(|nested| {
            if nested.path.is_ident("message") {
                message = Some(nested.value()?.parse::<LitStr>()?);
                return Ok(());
            }
            if option(&nested)? {
                return Ok(());
            }
            Err(nested.error("unsupported validate rule option"))
        })?;
    }
    Ok(message)
}

fn parse_str_array(nested: &ParseNestedMeta<'_>) -> Result<Vec<LitStr>, syn::Error> {
    let array: ExprArray = nested.value()?.parse()?;
    array
        .elems
        .iter()
        .map(|element| match element {
            Expr::Lit(expr) => match &expr.lit {
                Lit::Str(value) => Ok(value.clone()),
                other => Err(syn::Error::new_spanned(other, "expected a string literal")),
            },
            other => Err(syn::Error::new_spanned(other, "expected a string literal")),
        })
        .collect()
}

fn parse_int_array(nested: &ParseNestedMeta<'_>) -> Result<Vec<i64>, syn::Error> {
    let array: ExprArray = nested.value()?.parse()?;
    array
        .elems
        .iter()
        .map(|element| match element {
            Expr::Lit(expr) => match &expr.lit {
                Lit::Int(value) => value.base10_parse::<i64>(),
                other => Err(syn::Error::new_spanned(other, "expected an integer literal")),
            },
            other => Err(syn::Error::new_spanned(other, "expected an integer literal")),
        })
        .collect()
}

// =============================================================================
// EXPANSION
// =============================================================================

struct Target<'a> {
    ident: &'a Ident,
    field_name: &'a str,
    ty: &'a Type,
    is_option: bool,
    error_ty: &'a Path,
}

impl Target<'_> {
    fn field_lit(&self) -> LitStr {
        LitStr::new(self.field_name, Span::call_site())
    }
}

fn unwrap_option(ty: &Type) -> (bool, &Type) {
    option_inner(ty).map_or((false, ty), |inner| (true, inner))
}

fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    first_type_argument(&segment.arguments)
}

fn first_type_argument(arguments: &PathArguments) -> Option<&Type> {
    let PathArguments::AngleBracketed(args) = arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    })
}

fn expand_non_empty(target: &Target<'_>) -> Result<proc_macro2::TokenStream, syn::Error> {
    if !is_string_like(target.ty) {
        return Err(syn::Error::new_spanned(
            target.ty,
            "non_empty can only be used on string-like fields",
        ));
    }
    let ident = target.ident;
    let error_ty = target.error_ty;
    let field_name = target.field_lit();
    let err_expr = quote! {
        <#error_ty as fleen_base_shared::ValidationError>::empty(#field_name)
    };
    if target.is_option {
        Ok(quote! {
            if let ::core::option::Option::Some(value) = self.#ident.as_ref() {
                if value.trim().is_empty() {
                    violations.push(#err_expr);
                }
            }
        })
    } else {
        Ok(quote! {
            if self.#ident.trim().is_empty() {
                violations.push(#err_expr);
            }
        })
    }
}

fn expand_range(
    target: &Target<'_>,
    min: &Lit,
    max: &Lit,
) -> Result<proc_macro2::TokenStream, syn::Error> {
    let kind = numeric_kind(target.ty).ok_or_else(|| {
        syn::Error::new_spanned(target.ty, "range can only be used on numeric fields")
    })?;
    let ident = target.ident;
    let error_ty = target.error_ty;
    let field_name = target.field_lit();
    let min_str = LitStr::new(&lit_to_string(min), Span::call_site());
    let max_str = LitStr::new(&lit_to_string(max), Span::call_site());

    let in_range = match kind {
        NumberKind::Float => quote! { value.is_finite() && (#min..=#max).contains(&value) },
        NumberKind::Integer => quote! { (#min..=#max).contains(&value) },
    };
    let push = quote! {
        if !(#in_range) {
            violations.push(<#error_ty as fleen_base_shared::ValidationError>::out_of_range(
                #field_name,
                value.to_string(),
                #min_str.to_string(),
                #max_str.to_string(),
            ));
        }
    };

    if target.is_option {
        Ok(quote! {
            if let ::core::option::Option::Some(value) = self.#ident.as_ref() {
                let value = *value;
                #push
            }
        })
    } else {
        Ok(quote! {
            {
                let value = self.#ident;
                #push
            }
        })
    }
}

fn expand_custom(ident: &Ident, path: &Path, is_option: bool) -> proc_macro2::TokenStream {
    let argument = if is_option {
        quote! { self.#ident.as_ref() }
    } else {
        quote! { &self.#ident }
    };
    quote! {
        if let ::core::result::Result::Err(error) = #path(#argument) {
            violations.push(error);
        }
    }
}

fn expand_text_rule(
    target: &Target<'_>,
    rule: &TextRule,
    message: Option<&LitStr>,
) -> Result<proc_macro2::TokenStream, syn::Error> {
    if !is_string_like(target.ty) {
        return Err(syn::Error::new_spanned(
            target.ty,
            "string rules can only be used on string-like fields",
        ));
    }
    let ident = target.ident;
    let error_ty = target.error_ty;
    let field_name = target.field_lit();
    let access = if target.is_option {
        quote! { self.#ident.as_deref() }
    } else {
        quote! { ::core::option::Option::Some(&*self.#ident) }
    };
    let variant = Ident::new(rule.variant(), Span::call_site());
    let predicate = rule.predicate();
    let message = message.map_or_else(|| rule.default_message(), ToTokens::to_token_stream);

    Ok(quote! {
        {
            let valid = match #access {
                ::core::option::Option::Some(value) => #predicate,
                ::core::option::Option::None => fleen_base_shared::validators::absent_is_valid(
                    fleen_base_shared::validators::Rule::#variant,
                ),
            };
            if !valid {
                violations.push(<#error_ty as fleen_base_shared::ValidationError>::invalid(
                    #field_name,
                    #message,
                ));
            }
        }
    })
}

impl TextRule {
    const fn variant(&self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Password => "Password",
            Self::Year => "Year",
            Self::Number => "Number",
            Self::Boolean => "Boolean",
            Self::OneOf { .. } => "OneOf",
            Self::EnumName(_) => "EnumName",
            Self::EnumOrdinal(_) => "EnumOrdinal",
            Self::Date(_) => "Date",
            Self::DateTime(_) => "DateTime",
            Self::FutureDate { .. } => "FutureDate",
        }
    }

    fn predicate(&self) -> proc_macro2::TokenStream {
        match self {
            Self::Email => quote! { fleen_base_shared::validators::is_valid_email(value) },
            Self::Phone => quote! { fleen_base_shared::validators::is_valid_phone_number(value) },
            Self::Password => quote! { fleen_base_shared::validators::is_valid_password(value) },
            Self::Year => quote! { fleen_base_shared::validators::is_valid_year(value) },
            Self::Number => quote! { fleen_base_shared::validators::is_valid_number(value) },
            Self::Boolean => quote! { fleen_base_shared::validators::is_boolean(value) },
            Self::OneOf {
                values,
                enum_type,
                ignore_case,
            } => {
                let names = enum_names(enum_type.as_ref());
                quote! {
                    fleen_base_shared::validators::is_one_of(
                        value,
                        #names,
                        &[#(#values),*],
                        #ignore_case,
                    )
                }
            },
            Self::EnumName(path) => {
                quote! { fleen_base_shared::validators::is_enum_name::<#path>(value) }
            },
            Self::EnumOrdinal(accepted) => {
                quote! { fleen_base_shared::validators::is_enum_ordinal(value, &[#(#accepted),*]) }
            },
            Self::Date(pattern) => {
                let pattern = optional_pattern(pattern.as_ref());
                quote! { fleen_base_shared::validators::is_valid_date(value, #pattern) }
            },
            Self::DateTime(pattern) => {
                let pattern = optional_pattern(pattern.as_ref());
                quote! { fleen_base_shared::validators::is_valid_date_time(value, #pattern) }
            },
            Self::FutureDate { date_only } => {
                quote! { fleen_base_shared::validators::is_future(value, #date_only) }
            },
        }
    }

    fn default_message(&self) -> proc_macro2::TokenStream {
        let constant = match self {
            Self::Email => "EMAIL",
            Self::Phone => "PHONE",
            Self::Password => "PASSWORD",
            Self::Year => "YEAR",
            Self::Number => "NUMBER",
            Self::Boolean => "BOOLEAN",
            Self::EnumOrdinal(_) => "ENUM_ORDINAL",
            Self::Date(_) => "DATE",
            Self::DateTime(_) => "DATE_TIME",
            Self::FutureDate { .. } => "FUTURE_DATE",
            Self::OneOf {
                values, enum_type, ..
            } => {
                let names = enum_names(enum_type.as_ref());
                let label = enum_label(enum_type.as_ref());
                return quote! {
                    fleen_base_shared::validators::one_of_message(#names, &[#(#values),*], #label)
                };
            },
            Self::EnumName(path) => {
                let names = enum_names(Some(path));
                let label = enum_label(Some(path));
                return quote! {
                    fleen_base_shared::validators::one_of_message(#names, &[], #label)
                };
            },
        };
        let constant = Ident::new(constant, Span::call_site());
        quote! { fleen_base_shared::validators::messages::#constant }
    }
}

fn enum_names(enum_type: Option<&Path>) -> proc_macro2::TokenStream {
    enum_type.map_or_else(
        || quote! { &[] },
        |path| quote! { &<#path as fleen_base_shared::LabeledEnum>::names() },
    )
}

fn enum_label(enum_type: Option<&Path>) -> LitStr {
    let label = enum_type
        .and_then(|path| path.segments.last())
        .map(|segment| segment.ident.to_string())
        .unwrap_or_default();
    LitStr::new(&label, Span::call_site())
}

fn optional_pattern(pattern: Option<&LitStr>) -> proc_macro2::TokenStream {
    pattern.map_or_else(
        || quote! { ::core::option::Option::None },
        |pattern| quote! { ::core::option::Option::Some(#pattern) },
    )
}

fn expand_container_rule(
    rule: &ContainerRule,
    known: &BTreeMap<String, FieldInfo>,
    error_ty: &Path,
) -> Result<proc_macro2::TokenStream, syn::Error> {
    let (first, second, message, predicate, default_message) = match rule {
        ContainerRule::DateRange {
            start,
            end,
            message,
        } => (
            start,
            end,
            message,
            quote! { fleen_base_shared::validators::is_chronological },
            quote! { fleen_base_shared::validators::messages::DATE_RANGE },
        ),
        ContainerRule::FieldMatch {
            first,
            second,
            message,
        } => (
            first,
            second,
            message,
            quote! { fleen_base_shared::validators::fields_match },
            quote! { fleen_base_shared::validators::messages::FIELD_MATCH },
        ),
    };
    let first = lookup_field(known, first)?;
    let second = lookup_field(known, second)?;
    let first_access = field_access(first);
    let second_access = field_access(second);
    let field_name = LitStr::new(&first.name, Span::call_site());
    let message = message
        .as_ref()
        .map_or(default_message, ToTokens::to_token_stream);

    Ok(quote! {
        if !#predicate(#first_access, #second_access) {
            violations.push(<#error_ty as fleen_base_shared::ValidationError>::invalid(
                #field_name,
                #message,
            ));
        }
    })
}

fn lookup_field<'a>(
    known: &'a BTreeMap<String, FieldInfo>,
    name: &LitStr,
) -> Result<&'a FieldInfo, syn::Error> {
    known.get(&name.value()).ok_or_else(|| {
        syn::Error::new(name.span(), format!("unknown field `{}`", name.value()))
    })
}

fn field_access(info: &FieldInfo) -> proc_macro2::TokenStream {
    let ident = &info.ident;
    if info.is_option {
        quote! { self.#ident.as_ref() }
    } else {
        quote! { ::core::option::Option::Some(&self.#ident) }
    }
}

// =============================================================================
// TYPE INSPECTION
// =============================================================================

fn is_string_like(ty: &Type) -> bool {
    match ty {
        Type::Reference(reference) => is_string_like(&reference.elem),
        Type::Path(type_path) => {
            let Some(segment) = type_path.path.segments.last() else {
                return false;
            };
            if segment.ident == "String" || segment.ident == "str" {
                return true;
            }
            segment.ident == "Box"
                && first_type_argument(&segment.arguments).is_some_and(is_str_type)
        },
        _ => false,
    }
}

fn is_str_type(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "str"),
        Type::Reference(reference) => is_str_type(&reference.elem),
        _ => false,
    }
}

#[derive(Copy, Clone, Debug)]
enum NumberKind {
    Integer,
    Float,
}

fn numeric_kind(ty: &Type) -> Option<NumberKind> {
    match ty {
        Type::Reference(reference) => numeric_kind(&reference.elem),
        Type::Path(type_path) => {
            let segment = type_path.path.segments.last()?;
            match segment.ident.to_string().as_str() {
                "f32" | "f64" => Some(NumberKind::Float),
                "u8" | "u16" | "u32" | "u64" | "u128" | "usize" | "i8" | "i16" | "i32" | "i64"
                | "i128" | "isize" => Some(NumberKind::Integer),
                _ => None,
            }
        },
        _ => None,
    }
}

fn lit_to_string(lit: &Lit) -> String {
    match lit {
        Lit::Int(value) => value.base10_digits().to_string(),
        Lit::Float(value) => value.base10_digits().to_string(),
        Lit::Str(value) => value.value(),
        _ => lit.to_token_stream().to_string(),
    }
}
