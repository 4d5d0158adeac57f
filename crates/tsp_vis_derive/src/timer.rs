use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemFn, LitStr, ReturnType, parse_macro_input};

pub fn timer_inner(attr: TokenStream, item: TokenStream) -> TokenStream {
    let label = parse_macro_input!(attr as LitStr);
    let mut func = parse_macro_input!(item as ItemFn);

    if func.sig.asyncness.is_some() {
        return syn::Error::new_spanned(&func.sig, "`timer` does not support async functions")
            .to_compile_error()
            .into();
    }

    let body = &func.block;
    let ret = match &func.sig.output {
        ReturnType::Default => quote! {},
        ReturnType::Type(_, ty) => quote! { -> #ty },
    };

    let wrapped = quote! {{
        let __timer_start = std::time::Instant::now();
        #[allow(clippy::redundant_closure_call)]
        let __timer_result = (|| #ret #body)();
        log::debug!(
            "{}: elapsed_s={:.3}",
            #label,
            __timer_start.elapsed().as_secs_f64()
        );
        __timer_result
    }};

    func.block = Box::new(match syn::parse2(wrapped) {
        Ok(block) => block,
        Err(err) => return err.to_compile_error().into(),
    });

    TokenStream::from(quote! { #func })
}
