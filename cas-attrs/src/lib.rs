mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Derives the `cas_error::ErrorKind` trait for the given struct.
///
/// The information of the error is customized with the `error` attribute:
///
/// ```ignore
/// use cas_attrs::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(message = "unexpected end of input", labels = ["add something here"])]
/// pub struct UnexpectedEof;
/// ```
///
/// | Tag       | Description                                                                    |
/// | --------- | ------------------------------------------------------------------------------ |
/// | `message` | The message displayed at the top of the report.                                |
/// | `labels`  | An iterable of strings; label `i` points at span `i` of the error.             |
/// | `help`    | Optional help text describing what the user can do to fix the error.           |
///
/// Every tag accepts an arbitrary expression. For structs with named fields, the fields are in
/// scope while the expressions are evaluated. Tuple structs are rejected.
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    quote! {
        impl cas_error::ErrorKind for #name {
            #target
        }
    }.into()
}
