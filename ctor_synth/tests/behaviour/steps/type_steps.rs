//! Steps that describe the type a directive is placed on.

use crate::fixtures::SynthContext;
use anyhow::{Result, anyhow, ensure};
use ctor_synth::ast::{MethodKind, Modifiers, Visibility};
use ctor_synth::{
    Annotation, Enclosure, MethodDecl, RawField, RawType, SynthConfig, TypeExpr, TypeParam,
};
use rstest_bdd_macros::given;
use test_helpers::text::normalize_scalar;

fn update_type<F>(ctx: &SynthContext, f: F) -> Result<()>
where
    F: FnOnce(RawType) -> RawType,
{
    let ty = ctx
        .ty
        .take()
        .ok_or_else(|| anyhow!("declare the type before describing its members"))?;
    ctx.ty.set(f(ty));
    Ok(())
}

fn add_field(ctx: &SynthContext, field: RawField) -> Result<()> {
    update_type(ctx, |ty| ty.field(field))
}

fn field(name: &str, ty: &str) -> RawField {
    RawField::new(normalize_scalar(name), TypeExpr::named(normalize_scalar(ty)))
}

#[given("a type named {name}")]
fn type_named(#[from(synth_context)] ctx: &SynthContext, name: String) -> Result<()> {
    ensure!(ctx.ty.is_empty(), "type already declared");
    ctx.ty.set(RawType::new(normalize_scalar(&name)));
    Ok(())
}

#[given("a generic type named {name} with parameter {param}")]
fn generic_type_named(#[from(synth_context)] ctx: &SynthContext, name: String, param: String) -> Result<()> {
    ensure!(ctx.ty.is_empty(), "type already declared");
    ctx.ty.set(
        RawType::new(normalize_scalar(&name)).type_param(TypeParam::new(normalize_scalar(&param))),
    );
    Ok(())
}

#[given("a field {name} of type {ty}")]
fn plain_field(#[from(synth_context)] ctx: &SynthContext, name: String, ty: String) -> Result<()> {
    add_field(ctx, field(&name, &ty))
}

#[given("a final field {name} of type {ty}")]
fn final_field(#[from(synth_context)] ctx: &SynthContext, name: String, ty: String) -> Result<()> {
    add_field(ctx, field(&name, &ty).final_())
}

#[given("an initialized final field {name} of type {ty}")]
fn initialized_final_field(#[from(synth_context)] ctx: &SynthContext, name: String, ty: String) -> Result<()> {
    add_field(ctx, field(&name, &ty).final_().initialized())
}

#[given("a static field {name} of type {ty}")]
fn static_field(#[from(synth_context)] ctx: &SynthContext, name: String, ty: String) -> Result<()> {
    add_field(ctx, field(&name, &ty).static_())
}

#[given("a non-null field {name} of type {ty}")]
fn non_null_field(#[from(synth_context)] ctx: &SynthContext, name: String, ty: String) -> Result<()> {
    add_field(ctx, field(&name, &ty).annotated(Annotation::marker("NonNull")))
}

#[given("a nullable field {name} of type {ty}")]
fn nullable_field(#[from(synth_context)] ctx: &SynthContext, name: String, ty: String) -> Result<()> {
    add_field(ctx, field(&name, &ty).annotated(Annotation::marker("Nullable")))
}

#[given("a user-written no-argument constructor")]
fn user_constructor(#[from(synth_context)] ctx: &SynthContext) -> Result<()> {
    update_type(ctx, |ty| {
        let name = ty.name.clone();
        ty.method(MethodDecl {
            modifiers: Modifiers::with_visibility(Visibility::Public),
            name,
            kind: MethodKind::Constructor,
            type_params: Vec::new(),
            params: Vec::new(),
            body: Vec::new(),
        })
    })
}

#[given("the type is annotated {annotation}")]
fn type_annotated(#[from(synth_context)] ctx: &SynthContext, annotation: String) -> Result<()> {
    let written = normalize_scalar(&annotation);
    let name = written.trim_start_matches('@').to_owned();
    update_type(ctx, |ty| ty.annotated(Annotation::marker(name)))
}

#[given("the type is declared inside method {method}")]
fn declared_in_method(#[from(synth_context)] ctx: &SynthContext, method: String) -> Result<()> {
    let chain = vec![
        Enclosure::Method {
            name: normalize_scalar(&method),
        },
        Enclosure::Type {
            name: "Outer".to_owned(),
        },
        Enclosure::CompilationUnit,
    ];
    update_type(ctx, |ty| ty.enclosed_by(chain))
}

#[given("the type is a member of {outer}")]
fn member_of(#[from(synth_context)] ctx: &SynthContext, outer: String) -> Result<()> {
    let chain = vec![
        Enclosure::Type {
            name: normalize_scalar(&outer),
        },
        Enclosure::CompilationUnit,
    ];
    update_type(ctx, |ty| ty.enclosed_by(chain))
}

#[given("settings that suppress property metadata")]
fn suppressing_settings(#[from(synth_context)] ctx: &SynthContext) {
    ctx.config.set(SynthConfig {
        suppress_constructor_properties: true,
        ..SynthConfig::default()
    });
}
