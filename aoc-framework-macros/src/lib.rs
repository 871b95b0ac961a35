//! Procedural macros for the `aoc-framework` crate.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::parse::Parse;
use syn::{Error, Expr, Item, ItemImpl, ItemStruct, Type, parse_macro_input};

/// Properties collected from the `#[solution_runner(...)]` arguments.
#[derive(Default)]
struct RunnerProperties {
    /// Expression for the solution's display name; should resolve to a string slice.
    name: Option<Expr>,
    /// Type implementing `ParseData`, if the solution parses its input.
    parsed: Option<Type>,
    /// Type implementing `Solution<PartOne>`.
    part_one: Option<Type>,
    /// Type implementing `Solution<PartTwo>`.
    part_two: Option<Type>,
}

/// Store a property value, rejecting a second occurrence of the same key.
fn set_once<T: Parse>(
    slot: &mut Option<T>,
    meta: &ParseNestedMeta<'_>,
    key: &str,
) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error(format!("duplicate '{key}' property")));
    }
    *slot = Some(meta.value()?.parse()?);
    Ok(())
}

/// Unwrap a required property or produce a compile error naming it.
fn require<T>(slot: Option<T>, key: &str) -> syn::Result<T> {
    slot.ok_or_else(|| {
        Error::new(
            Span::call_site(),
            format!("missing required property: '{key}'"),
        )
    })
}

/// Procedural macro attribute that generates a `SolutionRunner` implementation.
///
/// The generated `run` dispatches to the runner's solve function for the part selected at
/// runtime.
///
/// # Properties
///
/// - `name` (required): An expression that evaluates to `&str`, representing the solution's
///   display name. Can be a string literal or a constant.
/// - `part_one` (required): The type implementing `Solution<PartOne>`.
/// - `part_two` (required): The type implementing `Solution<PartTwo>`.
/// - `parsed` (optional): A type that implements `ParseData`, used to parse input before solving.
///   If omitted, the unparsed input string is passed directly to solvers.
///
/// # Errors
///
/// Returns a compile error if:
/// - Applied to anything other than a struct or impl block
/// - Required properties are missing
/// - Any property is specified more than once
/// - An unsupported property is provided
///
/// # Examples
///
/// With a struct `Lagoon` implementing `ParseData` and a struct `Day18` implementing both
/// `Solution<PartOne>` & `Solution<PartTwo>`, registered on a day-indexed struct:
///
/// ```ignore
/// #[solution_runner(name = "Day 18", parsed = Lagoon, part_one = Day18, part_two = Day18)]
/// impl super::AdventOfCode2023<18> {}
/// ```
///
/// Without a parse step, the solutions take `str` input:
///
/// ```ignore
/// #[solution_runner(name = "Day 1", part_one = Day01, part_two = Day01)]
/// struct Day01Runner;
/// ```
#[proc_macro_attribute]
pub fn solution_runner(args: TokenStream, input: TokenStream) -> TokenStream {
    let mut properties = RunnerProperties::default();

    let properties_parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("name") {
            set_once(&mut properties.name, &meta, "name")
        } else if meta.path.is_ident("parsed") {
            set_once(&mut properties.parsed, &meta, "parsed")
        } else if meta.path.is_ident("part_one") {
            set_once(&mut properties.part_one, &meta, "part_one")
        } else if meta.path.is_ident("part_two") {
            set_once(&mut properties.part_two, &meta, "part_two")
        } else {
            Err(meta.error("unsupported solution runner property"))
        }
    });
    parse_macro_input!(args with properties_parser);

    let RunnerProperties {
        name,
        parsed,
        part_one,
        part_two,
    } = properties;
    let required = require(name, "name").and_then(|name| {
        let part_one = require(part_one, "part_one")?;
        let part_two = require(part_two, "part_two")?;
        Ok((name, part_one, part_two))
    });
    let (name_expr, part_one_ty, part_two_ty) = match required {
        Ok(values) => values,
        Err(error) => return error.to_compile_error().into(),
    };

    let solve_function_call = match parsed {
        None => quote! {
            aoc_framework::runner::solve_solution::<#part_one_ty, #part_two_ty>(
                #name_expr,
                input,
                part,
                handler,
                timed
            )
        },
        Some(parsed_ty) => quote! {
            aoc_framework::runner::solve_parsed_solution::<
                #parsed_ty,
                #part_one_ty,
                #part_two_ty
            >(#name_expr, input, part, handler, timed)
        },
    };

    let original_input = proc_macro2::TokenStream::from(input.clone());
    let item = parse_macro_input!(input as Item);

    let runner_ty = match item {
        Item::Struct(ItemStruct { ident, .. }) => quote! { #ident },
        Item::Impl(ItemImpl { self_ty, .. }) => quote! { #self_ty },
        _ => {
            return Error::new(
                Span::call_site(),
                "the #[solution_runner] macro can only be applied to a struct or an impl block",
            )
            .to_compile_error()
            .into();
        }
    };

    TokenStream::from(quote! {
        #original_input

        impl aoc_framework::runner::SolutionRunner for #runner_ty {
            fn run(
                input: &str,
                part: aoc_framework::PartKind,
                handler: &mut dyn aoc_framework::runner::OutputHandler,
                timed: bool
            ) -> aoc_framework::DynamicResult<()> {
                #solve_function_call
            }
        }
    })
}
