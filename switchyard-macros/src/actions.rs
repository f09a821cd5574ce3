//! The `#[actions]` attribute.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{Attribute, FnArg, ImplItem, ImplItemFn, ItemImpl, LitStr, Type, spanned::Spanned};

/// Per-method options from `#[action(...)]`.
#[derive(Default)]
struct ActionArgs {
    explicit: bool,
    name: Option<String>,
    skip: bool,
}

impl ActionArgs {
    /// Collect and remove every `#[action(...)]` attribute.
    fn take_from(attrs: &mut Vec<Attribute>) -> syn::Result<Self> {
        let mut args = ActionArgs::default();
        let mut result = Ok(());

        attrs.retain(|attr| {
            if !attr.path().is_ident("action") {
                return true;
            }
            args.explicit = true;
            if result.is_ok() {
                result = attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("name") {
                        let lit: LitStr = meta.value()?.parse()?;
                        args.name = Some(lit.value());
                        Ok(())
                    } else if meta.path.is_ident("skip") {
                        args.skip = true;
                        Ok(())
                    } else {
                        Err(meta.error("unknown action attribute, expected `name` or `skip`"))
                    }
                });
            }
            false
        });

        result.map(|()| args)
    }
}

/// A registered action after validation.
struct Action {
    name: String,
    method: syn::Ident,
    params: Vec<Type>,
}

impl Action {
    fn from_method(method: &mut ImplItemFn) -> syn::Result<Option<Self>> {
        let args = ActionArgs::take_from(&mut method.attrs)?;
        if args.skip {
            return Ok(None);
        }
        if method.sig.asyncness.is_none() {
            if args.explicit {
                return Err(syn::Error::new_spanned(
                    &method.sig,
                    "actions must be async fn",
                ));
            }
            return Ok(None);
        }

        let mut inputs = method.sig.inputs.iter();
        match inputs.next() {
            Some(FnArg::Typed(_)) => {}
            Some(FnArg::Receiver(receiver)) => {
                return Err(syn::Error::new(
                    receiver.span(),
                    "actions take the dispatch context instead of `self`: `cx: &mut Dispatch<Self>`",
                ));
            }
            None => {
                return Err(syn::Error::new(
                    method.sig.span(),
                    "actions must take the dispatch context as first argument: `cx: &mut Dispatch<Self>`",
                ));
            }
        }

        let params = inputs
            .map(|input| match input {
                FnArg::Typed(pat_type) => Ok((*pat_type.ty).clone()),
                FnArg::Receiver(receiver) => {
                    Err(syn::Error::new(receiver.span(), "unexpected `self` parameter"))
                }
            })
            .collect::<syn::Result<Vec<_>>>()?;

        if !method.sig.generics.params.is_empty() {
            return Err(syn::Error::new(
                method.sig.generics.span(),
                "actions cannot be generic",
            ));
        }

        Ok(Some(Action {
            name: args.name.unwrap_or_else(|| method.sig.ident.to_string()),
            method: method.sig.ident.clone(),
            params,
        }))
    }

    fn shim_ident(&self) -> syn::Ident {
        format_ident!("__switchyard_action_{}", self.method)
    }

    /// A plain `fn` with the `ActionFn` signature that extracts the route
    /// arguments and boxes the call.
    fn shim(&self) -> TokenStream2 {
        let shim = self.shim_ident();
        let method = &self.method;

        let bindings: Vec<_> = (0..self.params.len())
            .map(|i| format_ident!("__arg{}", i))
            .collect();
        let extraction = self.params.iter().zip(&bindings).enumerate().map(|(i, (ty, binding))| {
            quote! {
                let #binding = match __args.arg::<#ty>(#i) {
                    ::core::result::Result::Ok(value) => value,
                    ::core::result::Result::Err(err) => {
                        return ::std::boxed::Box::pin(::core::future::ready(
                            ::core::result::Result::Err(err),
                        ));
                    }
                };
            }
        });

        let args_pat = if self.params.is_empty() {
            quote! { _ }
        } else {
            quote! { __args }
        };

        quote! {
            #[doc(hidden)]
            #[allow(non_snake_case)]
            fn #shim<'__a>(
                __cx: &'__a mut ::switchyard::Dispatch<Self>,
                #args_pat: ::switchyard::RouteArgs,
            ) -> ::switchyard::ActionFuture<'__a, <Self as ::switchyard::Controller>::Output> {
                #(#extraction)*
                ::std::boxed::Box::pin(Self::#method(__cx #(, #bindings)*))
            }
        }
    }
}

pub fn actions_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    expand(attr.into(), item.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(attr: TokenStream2, item: TokenStream2) -> syn::Result<TokenStream2> {
    if !attr.is_empty() {
        return Err(syn::Error::new(attr.span(), "`#[actions]` takes no arguments"));
    }

    let mut input: ItemImpl = syn::parse2(item)?;

    if let Some((_, path, _)) = &input.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "`#[actions]` goes on an inherent impl block",
        ));
    }

    let mut actions = Vec::new();
    for item in &mut input.items {
        if let ImplItem::Fn(method) = item {
            if let Some(action) = Action::from_method(method)? {
                actions.push(action);
            }
        }
    }

    let shims = actions.iter().map(Action::shim);
    let registrations = actions.iter().map(|action| {
        let name = &action.name;
        let shim = action.shim_ident();
        quote! { .action(#name, Self::#shim as ::switchyard::ActionFn<Self>) }
    });

    let self_ty = &input.self_ty;
    let (impl_generics, _, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        #input

        impl #impl_generics #self_ty #where_clause {
            #(#shims)*
        }

        impl #impl_generics ::switchyard::Actions for #self_ty #where_clause {
            fn actions(
                table: ::switchyard::ActionTableBuilder<Self>,
            ) -> ::switchyard::ActionTableBuilder<Self> {
                table #(#registrations)*
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand_err(item: TokenStream2) -> String {
        match expand(TokenStream2::new(), item) {
            Ok(tokens) => panic!("expected an error, got `{tokens}`"),
            Err(err) => err.to_string(),
        }
    }

    #[test]
    fn test_registers_async_fns_only() {
        let tokens = expand(
            TokenStream2::new(),
            quote! {
                impl PostsController {
                    #[action(name = "list")]
                    async fn index(cx: &mut Dispatch<Self>) -> Result<Response, DispatchError> {
                        todo!()
                    }

                    fn helper(&self) {}
                }
            },
        )
        .unwrap()
        .to_string();

        assert!(tokens.contains("\"list\""));
        assert!(tokens.contains("__switchyard_action_index"));
        assert!(!tokens.contains("__switchyard_action_helper"));
        assert!(!tokens.contains("# [action"));
    }

    #[test]
    fn test_named_sync_fn_is_rejected() {
        let err = expand_err(quote! {
            impl PostsController {
                #[action(name = "list")]
                fn index(cx: &mut Dispatch<Self>) -> Result<Response, DispatchError> {
                    todo!()
                }
            }
        });
        assert_eq!(err, "actions must be async fn");
    }

    #[test]
    fn test_skipped_sync_fn_is_allowed() {
        let result = expand(
            TokenStream2::new(),
            quote! {
                impl PostsController {
                    #[action(skip)]
                    fn index(cx: &mut Dispatch<Self>) {}
                }
            },
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_self_receiver_is_rejected() {
        let err = expand_err(quote! {
            impl PostsController {
                async fn index(&self) -> Result<Response, DispatchError> {
                    todo!()
                }
            }
        });
        assert!(err.contains("instead of `self`"));
    }

    #[test]
    fn test_trait_impl_is_rejected() {
        let err = expand_err(quote! {
            impl Clone for PostsController {
                fn clone(&self) -> Self {
                    todo!()
                }
            }
        });
        assert_eq!(err, "`#[actions]` goes on an inherent impl block");
    }
}
