//! Steps that handle directives and inspect the generated members.

use crate::fixtures::SynthContext;
use anyhow::{Result, anyhow, ensure};
use ctor_synth::{
    AccessLevel, CompilationUnit, Conflict, Directive, DirectiveHandler, DirectiveKind,
    MemoryHost, Outcome, ProcessedDirectives, SkipReason, SynthConfig,
};
use rstest_bdd_macros::{then, when};
use test_helpers::text::{normalize_scalar, split_list, squash_whitespace};

const ACCESS_IMPORT: &str = "lombok.AccessLevel";

fn config(ctx: &SynthContext) -> SynthConfig {
    ctx.config.get().unwrap_or_default()
}

/// Takes the host, creating it around the declared type on first use.
fn take_host(ctx: &SynthContext) -> Result<MemoryHost> {
    if let Some(host) = ctx.host.take() {
        return Ok(host);
    }
    let ty = ctx
        .ty
        .get()
        .ok_or_else(|| anyhow!("declare a type before handling directives"))?;
    let unit = CompilationUnit::with_types(vec![ty]).import(ACCESS_IMPORT);
    Ok(MemoryHost::with_config(unit, &config(ctx)))
}

fn handle(ctx: &SynthContext, written: &str, args: &str) -> Result<()> {
    let name = normalize_scalar(written);
    let kind = DirectiveKind::from_annotation(name.trim_start_matches('@'), "lombok")
        .ok_or_else(|| anyhow!("`{name}` is not a constructor directive"))?;
    let ty = ctx
        .ty
        .get()
        .ok_or_else(|| anyhow!("declare a type before handling directives"))?;
    let directive = match Directive::parse(kind, ty.qualified_name(), args) {
        Ok(directive) => directive,
        Err(err) => {
            ctx.error.set(err.to_string());
            return Ok(());
        }
    };
    let mut host = take_host(ctx)?;
    let mut processed = ctx.processed.take().unwrap_or_default();
    let result =
        DirectiveHandler::from(&config(ctx)).handle(&directive, &ty, &mut host, &mut processed);
    ctx.host.set(host);
    ctx.processed.set(processed);
    match result {
        Ok(outcome) => ctx.outcome.set(outcome),
        Err(err) => ctx.error.set(err.to_string()),
    }
    Ok(())
}

#[when("the {directive} directive is handled")]
fn handle_without_arguments(#[from(synth_context)] ctx: &SynthContext, directive: String) -> Result<()> {
    handle(ctx, &directive, "")
}

#[when("the {directive} directive is handled with {args}")]
fn handle_with_arguments(#[from(synth_context)] ctx: &SynthContext, directive: String, args: String) -> Result<()> {
    handle(ctx, &directive, &normalize_scalar(&args))
}

#[when("another generator requests a required-args constructor named {factory}")]
fn guarded_required_args(#[from(synth_context)] ctx: &SynthContext, factory: String) -> Result<()> {
    let ty = ctx
        .ty
        .get()
        .ok_or_else(|| anyhow!("declare a type before generating"))?;
    let mut host = take_host(ctx)?;
    let result = DirectiveHandler::from(&config(ctx)).generate_required_args_constructor(
        &ty,
        &mut host,
        AccessLevel::Public,
        &normalize_scalar(&factory),
        true,
    );
    ctx.host.set(host);
    ctx.outcome.set(result?);
    Ok(())
}

fn outcome(ctx: &SynthContext) -> Result<Outcome> {
    ctx.outcome
        .get()
        .ok_or_else(|| anyhow!("no directive has produced an outcome"))
}

fn generated(ctx: &SynthContext) -> Result<Vec<String>> {
    let ty = ctx.ty.get().ok_or_else(|| anyhow!("no type declared"))?;
    let owner = ty.qualified_name();
    ctx.host
        .with_ref(|host| {
            host.generated(&owner)
                .into_iter()
                .map(ToString::to_string)
                .collect()
        })
        .ok_or_else(|| anyhow!("no directive has been handled"))
}

#[then("a constructor is generated")]
fn constructor_generated(#[from(synth_context)] ctx: &SynthContext) -> Result<()> {
    let actual = outcome(ctx)?;
    ensure!(
        actual == Outcome::Generated { factory: None },
        "unexpected outcome {actual:?}"
    );
    Ok(())
}

#[then("a constructor and the factory {name} are generated")]
fn factory_generated(#[from(synth_context)] ctx: &SynthContext, name: String) -> Result<()> {
    let actual = outcome(ctx)?;
    let expected = Outcome::Generated {
        factory: Some(normalize_scalar(&name)),
    };
    ensure!(actual == expected, "unexpected outcome {actual:?}");
    Ok(())
}

#[then("generation is skipped because {reason}")]
fn generation_skipped(#[from(synth_context)] ctx: &SynthContext, reason: String) -> Result<()> {
    let actual = outcome(ctx)?;
    let matched = matches!(
        (normalize_scalar(&reason).as_str(), &actual),
        ("the access level is NONE", Outcome::Skipped(SkipReason::AccessNone))
            | (
                "the directive was already processed",
                Outcome::Skipped(SkipReason::AlreadyProcessed)
            )
            | (
                "a constructor already exists",
                Outcome::Skipped(SkipReason::Conflict(Conflict::ConstructorExists(_)))
            )
            | (
                "another directive will generate",
                Outcome::Skipped(SkipReason::Conflict(Conflict::CompetingDirective(_)))
            )
    );
    ensure!(matched, "outcome {actual:?} does not match `{reason}`");
    Ok(())
}

#[then("{count} members are generated")]
fn member_count(#[from(synth_context)] ctx: &SynthContext, count: usize) -> Result<()> {
    let members = generated(ctx)?;
    ensure!(
        members.len() == count,
        "expected {count} members, found {members:?}"
    );
    Ok(())
}

#[then("member {index} is {rendered}")]
fn member_rendering(#[from(synth_context)] ctx: &SynthContext, index: usize, rendered: String) -> Result<()> {
    let members = generated(ctx)?;
    let actual = index
        .checked_sub(1)
        .and_then(|position| members.get(position))
        .ok_or_else(|| anyhow!("no member {index} in {members:?}"))?;
    let expected = squash_whitespace(&normalize_scalar(&rendered));
    ensure!(
        *actual == expected,
        "member {index} is {actual}; expected {expected}"
    );
    Ok(())
}

#[then("the constructor parameters are {names}")]
fn constructor_parameters(#[from(synth_context)] ctx: &SynthContext, names: String) -> Result<()> {
    let ty = ctx.ty.get().ok_or_else(|| anyhow!("no type declared"))?;
    let owner = ty.qualified_name();
    let actual = ctx
        .host
        .with_ref(|host| {
            host.generated(&owner)
                .into_iter()
                .find(|member| member.is_constructor())
                .map(|constructor| {
                    constructor
                        .params
                        .iter()
                        .map(|param| param.name.clone())
                        .collect::<Vec<_>>()
                })
        })
        .flatten()
        .ok_or_else(|| anyhow!("no constructor generated for {owner}"))?;
    let expected = split_list(&names);
    ensure!(actual == expected, "parameters {actual:?}; expected {expected:?}");
    Ok(())
}

#[then("the directive is rejected mentioning {fragment}")]
fn directive_rejected(#[from(synth_context)] ctx: &SynthContext, fragment: String) -> Result<()> {
    let error = ctx
        .error
        .take()
        .ok_or_else(|| anyhow!("the directive was accepted"))?;
    let wanted = normalize_scalar(&fragment);
    ensure!(
        error.contains(&wanted),
        "error `{error}` does not mention `{wanted}`"
    );
    Ok(())
}

#[then("the access level import is released")]
fn import_released(#[from(synth_context)] ctx: &SynthContext) -> Result<()> {
    let imports = ctx
        .host
        .with_ref(|host| host.unit().imports.clone())
        .ok_or_else(|| anyhow!("no directive has been handled"))?;
    ensure!(
        !imports.iter().any(|import| import == ACCESS_IMPORT),
        "import still present: {imports:?}"
    );
    Ok(())
}
