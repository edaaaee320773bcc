//! Procedural macros for defining operations
//!
//! `#[operation]` implements `laneboard_operations::Operation` for a struct,
//! deriving parameter metadata from its named fields and their doc comments.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input, Attribute, DeriveInput, Expr, Field, Ident, Lit, Meta, Token, Type,
};

/// Attribute macro for defining an operation
///
/// # Usage
///
/// ```ignore
/// #[operation(verb = "move", noun = "card", description = "Move a card")]
/// #[derive(Debug, Deserialize, Serialize)]
/// pub struct MoveCard {
///     /// The card to move
///     pub id: CardId,
///
///     /// Zero-based insertion index
///     pub position: usize,
/// }
/// ```
#[proc_macro_attribute]
pub fn operation(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as OperationArgs);
    let input = parse_macro_input!(item as DeriveInput);

    match expand_operation(&args, &input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_operation(args: &OperationArgs, input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let verb = &args.verb;
    let noun = &args.noun;
    let description = &args.description;

    let param_metas: Vec<_> = match &input.data {
        syn::Data::Struct(data) => match &data.fields {
            syn::Fields::Named(fields) => fields.named.iter().map(generate_param_meta).collect(),
            syn::Fields::Unit => Vec::new(),
            syn::Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    name,
                    "operation macro does not support tuple structs",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "operation macro only supports structs",
            ))
        }
    };

    let num_params = param_metas.len();

    Ok(quote! {
        #input

        impl ::laneboard_operations::Operation for #name {
            fn verb(&self) -> &'static str {
                #verb
            }

            fn noun(&self) -> &'static str {
                #noun
            }

            fn description(&self) -> &'static str {
                #description
            }

            fn parameters(&self) -> &'static [::laneboard_operations::ParamMeta] {
                static PARAMS: [::laneboard_operations::ParamMeta; #num_params] = [
                    #(#param_metas),*
                ];
                &PARAMS
            }
        }
    })
}

/// Arguments for the #[operation(...)] attribute
struct OperationArgs {
    verb: String,
    noun: String,
    description: String,
}

impl Parse for OperationArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut verb = None;
        let mut noun = None;
        let mut description = None;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            let value: Lit = input.parse()?;

            let value_str = match value {
                Lit::Str(s) => s.value(),
                _ => return Err(syn::Error::new_spanned(value, "expected string literal")),
            };

            match ident.to_string().as_str() {
                "verb" => verb = Some(value_str),
                "noun" => noun = Some(value_str),
                "description" => description = Some(value_str),
                other => {
                    return Err(syn::Error::new_spanned(
                        ident,
                        format!("unknown attribute: {}", other),
                    ))
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(OperationArgs {
            verb: verb.ok_or_else(|| input.error("missing 'verb' attribute"))?,
            noun: noun.ok_or_else(|| input.error("missing 'noun' attribute"))?,
            description: description
                .ok_or_else(|| input.error("missing 'description' attribute"))?,
        })
    }
}

/// Generate ParamMeta for a named field
fn generate_param_meta(field: &Field) -> TokenStream2 {
    let name = field
        .ident
        .as_ref()
        .map(|ident| ident.to_string())
        .unwrap_or_default();
    let description = extract_doc_comment(&field.attrs);
    let required = !is_option_type(&field.ty);
    let param_type = rust_type_to_param_type(&field.ty);

    let required_call = if required {
        quote! { .required() }
    } else {
        quote! {}
    };

    quote! {
        ::laneboard_operations::ParamMeta::new(#name)
            .description(#description)
            .param_type(#param_type)
            #required_call
    }
}

fn extract_doc_comment(attrs: &[Attribute]) -> String {
    let docs: Vec<String> = attrs
        .iter()
        .filter_map(|attr| {
            if !attr.path().is_ident("doc") {
                return None;
            }
            let Meta::NameValue(nv) = &attr.meta else {
                return None;
            };
            let Expr::Lit(lit) = &nv.value else {
                return None;
            };
            match &lit.lit {
                Lit::Str(s) => Some(s.value().trim().to_string()),
                _ => None,
            }
        })
        .collect();

    docs.join(" ")
}

fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    match ty {
        Type::Path(path) => path.path.segments.last(),
        _ => None,
    }
}

fn is_option_type(ty: &Type) -> bool {
    last_segment(ty).is_some_and(|segment| segment.ident == "Option")
}

/// Map a Rust field type onto a ParamType. Id newtypes and unknown types
/// are strings.
fn rust_type_to_param_type(ty: &Type) -> TokenStream2 {
    let Some(segment) = last_segment(ty) else {
        return quote! { ::laneboard_operations::ParamType::String };
    };

    if segment.ident == "Option" {
        if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
            if let Some(syn::GenericArgument::Type(inner)) = args.args.first() {
                return rust_type_to_param_type(inner);
            }
        }
    }

    match segment.ident.to_string().as_str() {
        "Vec" => quote! { ::laneboard_operations::ParamType::Array },
        "bool" => quote! { ::laneboard_operations::ParamType::Boolean },
        "i32" | "i64" | "u32" | "u64" | "usize" | "isize" => {
            quote! { ::laneboard_operations::ParamType::Integer }
        }
        "f32" | "f64" => quote! { ::laneboard_operations::ParamType::Number },
        _ => quote! { ::laneboard_operations::ParamType::String },
    }
}
