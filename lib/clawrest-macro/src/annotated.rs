use proc_macro2::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Error, Field, Fields, LitStr, Result, Token};

/// The tag declared on a field.
enum FieldTag {
    Path(LitStr),
    Query(LitStr),
    Header(LitStr),
    Body(LitStr),
}

impl FieldTag {
    fn is_body(&self) -> bool {
        matches!(self, Self::Body(_))
    }

    fn to_spec(&self, name: &str) -> TokenStream {
        match self {
            Self::Path(param) => quote! { ::clawrest_core::ParamSpec::path(#name, #param) },
            Self::Query(param) => quote! { ::clawrest_core::ParamSpec::query(#name, #param) },
            Self::Header(param) => quote! { ::clawrest_core::ParamSpec::header(#name, #param) },
            Self::Body(property) => quote! { ::clawrest_core::ParamSpec::body(#name, #property) },
        }
    }
}

struct AnnotatedField<'a> {
    field: &'a Field,
    name: String,
    tag: Option<FieldTag>,
}

impl<'a> AnnotatedField<'a> {
    fn parse(field: &'a Field) -> Result<Self> {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected a named field"))?;
        let name = ident.to_string().trim_start_matches("r#").to_string();

        let mut tag = None;
        for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("param")) {
            attr.parse_nested_meta(|meta| {
                if tag.is_some() {
                    return Err(meta.error("a field can only have one param tag"));
                }

                let parsed = if meta.path.is_ident("path") {
                    FieldTag::Path(meta.value()?.parse()?)
                } else if meta.path.is_ident("query") {
                    FieldTag::Query(meta.value()?.parse()?)
                } else if meta.path.is_ident("header") {
                    FieldTag::Header(meta.value()?.parse()?)
                } else if meta.path.is_ident("body") {
                    if meta.input.peek(Token![=]) {
                        FieldTag::Body(meta.value()?.parse()?)
                    } else {
                        FieldTag::Body(LitStr::new(&name, meta.path.span()))
                    }
                } else {
                    return Err(meta.error("expected one of `path`, `query`, `header` or `body`"));
                };

                tag = Some(parsed);
                Ok(())
            })?;
        }

        Ok(Self { field, name, tag })
    }
}

pub(crate) fn expand(input: &DeriveInput) -> Result<TokenStream> {
    let ident = &input.ident;
    let type_name = ident.to_string();

    let strukt = match &input.data {
        Data::Struct(s) => s,
        Data::Enum(_) => return Err(Error::new_spanned(input, "expected struct, found enum")),
        Data::Union(_) => return Err(Error::new_spanned(input, "expected struct, found union")),
    };

    let fields = match &strukt.fields {
        Fields::Named(fields) => fields,
        Fields::Unnamed(_) => {
            return Err(Error::new_spanned(
                &strukt.fields,
                "tuple structs are not supported",
            ));
        }
        Fields::Unit => {
            return Err(Error::new_spanned(
                &strukt.fields,
                "unit structs are not supported",
            ));
        }
    };

    let fields = fields
        .named
        .iter()
        .map(AnnotatedField::parse)
        .collect::<Result<Vec<_>>>()?;

    let specs = fields.iter().map(|field| match &field.tag {
        Some(tag) => tag.to_spec(&field.name),
        None => {
            let name = &field.name;
            quote! { ::clawrest_core::ParamSpec::untagged(#name) }
        }
    });

    let reads = fields.iter().enumerate().filter_map(|(index, field)| {
        field.tag.as_ref()?;
        let member = field.field.ident.as_ref()?;
        Some(quote! {
            #index => ::clawrest_core::ParamValue::new(&self.#member),
        })
    });

    let to_body = if fields
        .iter()
        .any(|field| field.tag.as_ref().is_some_and(FieldTag::is_body))
    {
        quote! { ::clawrest_core::body::to_formatted_json(self).map(::core::option::Option::Some) }
    } else {
        quote! { ::core::result::Result::Ok(::core::option::Option::None) }
    };

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::clawrest_core::Annotated for #ident #ty_generics #where_clause {
            fn type_name(&self) -> &'static str {
                #type_name
            }

            fn param_specs(&self) -> &'static [::clawrest_core::ParamSpec] {
                const SPECS: &[::clawrest_core::ParamSpec] = &[#(#specs),*];
                SPECS
            }

            fn read_field(
                &self,
                index: usize,
            ) -> ::core::result::Result<::clawrest_core::ParamValue, ::clawrest_core::RequestError> {
                match index {
                    #(#reads)*
                    _ => ::core::result::Result::Err(::clawrest_core::RequestError::UnreadableField {
                        type_name: #type_name,
                        index,
                    }),
                }
            }

            fn to_body(
                &self,
            ) -> ::core::result::Result<
                ::core::option::Option<::std::string::String>,
                ::clawrest_core::RequestError,
            > {
                #to_body
            }
        }
    })
}
