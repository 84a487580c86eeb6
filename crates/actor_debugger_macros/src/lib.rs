use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

// =============================================================================
// Inspect Derive Macro
// =============================================================================

/// Derive macro exposing a struct's fields to the inspector.
///
/// Every named field is reported in declaration order. Use `#[inspect(...)]`
/// on a field to control how it is reflected:
///
/// - `visible`: mark the field as externally visible (the walker only
///   enumerates visible fields).
/// - `skip`: leave the field out of reflection entirely. Skipped fields do not
///   need to implement `ToValue`.
///
/// # Examples
///
/// ```rust,ignore
/// #[derive(Inspect)]
/// pub struct Inventory {
///     #[inspect(visible)]
///     count: u32,
///     owner: Option<ObjectHandle>,
///     #[inspect(skip)]
///     cache: HashMap<u32, Item>,
/// }
/// ```
///
/// This generates implementations of `Inspect` and `ToValue`:
///
/// ```rust,ignore
/// impl Inspect for Inventory {
///     fn type_name(&self) -> &'static str { "Inventory" }
///     fn fields(&self) -> Vec<FieldDescriptor> { /* count (visible), owner */ }
///     fn field_value(&self, name: &str) -> Option<Value> { /* match on name */ }
/// }
/// ```
#[proc_macro_derive(Inspect, attributes(inspect))]
pub fn derive_inspect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match expand_inspect(&ast) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

struct ReflectedField {
    ident: syn::Ident,
    visible: bool,
}

fn expand_inspect(ast: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &ast.ident;
    let type_name = name.to_string();

    if !ast.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &ast.generics,
            "Inspect cannot be derived for generic structs",
        ));
    }

    let fields = reflected_fields(&ast.data, name)?;

    let descriptors = fields.iter().map(|field| {
        let field_name = field.ident.to_string();
        let flags = if field.visible {
            quote! { ::actor_debugger_common::FieldFlags::VISIBLE }
        } else {
            quote! { ::actor_debugger_common::FieldFlags::empty() }
        };
        quote! {
            ::actor_debugger_common::FieldDescriptor::new(#field_name, #flags)
        }
    });

    let value_arms = fields.iter().map(|field| {
        let ident = &field.ident;
        let field_name = ident.to_string();
        quote! {
            #field_name => ::std::option::Option::Some(
                ::actor_debugger_common::ToValue::to_value(&self.#ident)
            ),
        }
    });

    let struct_entries = fields.iter().map(|field| {
        let ident = &field.ident;
        let field_name = ident.to_string();
        quote! {
            (
                ::std::string::String::from(#field_name),
                ::actor_debugger_common::ToValue::to_value(&self.#ident),
            )
        }
    });

    Ok(quote! {
        impl ::actor_debugger_common::Inspect for #name {
            fn type_name(&self) -> &'static str {
                #type_name
            }

            fn fields(&self) -> ::std::vec::Vec<::actor_debugger_common::FieldDescriptor> {
                ::std::vec![#(#descriptors),*]
            }

            fn field_value(&self, name: &str) -> ::std::option::Option<::actor_debugger_common::Value> {
                match name {
                    #(#value_arms)*
                    _ => ::std::option::Option::None,
                }
            }
        }

        impl ::actor_debugger_common::ToValue for #name {
            fn to_value(&self) -> ::actor_debugger_common::Value {
                ::actor_debugger_common::Value::Struct(::std::vec![#(#struct_entries),*])
            }
        }
    })
}

fn reflected_fields(data: &Data, name: &syn::Ident) -> syn::Result<Vec<ReflectedField>> {
    let named = match data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unit => return Ok(Vec::new()),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Inspect can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Inspect can only be derived for structs",
            ));
        }
    };

    let mut fields = Vec::new();
    for field in named {
        let mut visible = false;
        let mut skip = false;

        for attr in &field.attrs {
            if !attr.path().is_ident("inspect") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("visible") {
                    visible = true;
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    skip = true;
                    Ok(())
                } else {
                    Err(meta.error("expected `visible` or `skip`"))
                }
            })?;
        }

        if skip {
            continue;
        }

        let ident = field
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
        fields.push(ReflectedField { ident, visible });
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_generic_struct_is_rejected() {
        let input: DeriveInput = parse_quote! {
            struct Slot<T> {
                #[inspect(visible)]
                item: T,
            }
        };
        let err = expand_inspect(&input).unwrap_err();
        assert!(err.to_string().contains("generic"));
    }

    #[test]
    fn test_tuple_struct_is_rejected() {
        let input: DeriveInput = parse_quote! {
            struct Meters(f32);
        };
        assert!(expand_inspect(&input).is_err());
    }

    #[test]
    fn test_unknown_attribute_is_rejected() {
        let input: DeriveInput = parse_quote! {
            struct Door {
                #[inspect(hidden)]
                open: bool,
            }
        };
        let err = expand_inspect(&input).unwrap_err();
        assert!(err.to_string().contains("expected `visible` or `skip`"));
    }

    #[test]
    fn test_named_struct_expands() {
        let input: DeriveInput = parse_quote! {
            struct Door {
                #[inspect(visible)]
                open: bool,
            }
        };
        let tokens = expand_inspect(&input).unwrap().to_string();
        assert!(tokens.contains("Inspect for Door"));
        assert!(tokens.contains("ToValue for Door"));
    }
}
