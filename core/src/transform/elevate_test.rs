use super::*;
use crate::api::BuildOptions;
use crate::test_utils::init_test_logging;
use crate::transform::ModelTransformPipeline;
use omnigen_types::{LiteralValue, PrimitiveKind};
use pretty_assertions::assert_eq;

fn first_pass(model: &mut OmniModel, options: &BuildOptions) {
    init_test_logging();
    ModelTransformPipeline::new()
        .with_first_pass(ElevateCommonPropertiesModelTransformer)
        .run(model, options)
        .unwrap();
}

fn second_pass(model: &mut OmniModel, features: TargetFeatures) {
    init_test_logging();
    let options = BuildOptions {
        features,
        ..BuildOptions::default()
    };
    ModelTransformPipeline::new()
        .with_second_pass(ElevateCommonPropertiesModelTransformer)
        .run(model, &options)
        .unwrap();
}

fn names(model: &OmniModel, id: TypeId) -> Vec<&str> {
    model.get(id).properties().iter().map(|p| p.name.as_str()).collect()
}

struct Family {
    model: OmniModel,
    animal: TypeId,
    dog: TypeId,
    cat: TypeId,
}

fn family() -> Family {
    let mut model = OmniModel::new("pets");
    let animal = model.object("Animal");
    let dog = model.object("Dog");
    let cat = model.object("Cat");
    model.extend(dog, animal).unwrap();
    model.extend(cat, animal).unwrap();
    model.export(dog);
    model.export(cat);
    Family {
        model,
        animal,
        dog,
        cat,
    }
}

#[test]
fn moves_identical_properties() {
    let Family {
        mut model,
        animal,
        dog,
        cat,
    } = family();
    let dog_name = model.primitive(PrimitiveKind::String);
    let cat_name = model.primitive(PrimitiveKind::String);
    let bark = model.primitive(PrimitiveKind::Bool);
    model.property(dog, "name", dog_name).unwrap().required = true;
    model.property(dog, "bark", bark).unwrap();
    model.property(cat, "name", cat_name).unwrap().required = true;

    first_pass(&mut model, &BuildOptions::default());

    assert_eq!(names(&model, animal), vec!["name"]);
    assert_eq!(names(&model, dog), vec!["bark"]);
    assert!(names(&model, cat).is_empty());

    let elevated = &model.get(animal).properties()[0];
    assert_eq!(elevated.ty, dog_name);
    assert_eq!(elevated.owner, animal);
    assert!(elevated.required);
    assert!(model.is_retired(cat_name));
}

#[test]
fn no_shared_properties_leaves_the_model_untouched() {
    let Family {
        mut model,
        dog,
        cat,
        ..
    } = family();
    let bark = model.primitive(PrimitiveKind::Bool);
    let lives = model.primitive(PrimitiveKind::Integer);
    model.property(dog, "bark", bark).unwrap();
    model.property(cat, "lives", lives).unwrap();
    let before = model.clone();

    first_pass(&mut model, &BuildOptions::default());

    assert_eq!(model, before);
}

#[test]
fn isomorphic_properties_stay() {
    let Family {
        mut model,
        animal,
        dog,
        cat,
    } = family();
    let int = model.primitive(PrimitiveKind::Integer);
    let double = model.primitive(PrimitiveKind::Double);
    model.property(dog, "weight", int).unwrap();
    model.property(cat, "weight", double).unwrap();

    first_pass(&mut model, &BuildOptions::default());

    assert!(names(&model, animal).is_empty());
    assert_eq!(names(&model, dog), vec!["weight"]);
}

#[test]
fn nullability_uses_the_nullable_type() {
    let Family {
        mut model,
        animal,
        dog,
        cat,
    } = family();
    let plain = model.primitive(PrimitiveKind::String);
    let nullable = model.nullable(PrimitiveKind::String);
    model.property(dog, "nick", plain).unwrap().required = true;
    model.property(cat, "nick", nullable).unwrap();

    first_pass(&mut model, &BuildOptions::default());

    let elevated = &model.get(animal).properties()[0];
    assert_eq!(elevated.ty, nullable);
    assert!(!elevated.required);
    assert!(model.is_retired(plain));
}

#[test]
fn stricter_threshold_keeps_nullability_differences() {
    let Family {
        mut model,
        animal,
        dog,
        cat,
    } = family();
    let plain = model.primitive(PrimitiveKind::String);
    let nullable = model.nullable(PrimitiveKind::String);
    model.property(dog, "nick", plain).unwrap();
    model.property(cat, "nick", nullable).unwrap();

    let mut options = BuildOptions::default();
    options.transform.elevate_properties_with_types_more_equal_than = EqualityLevel::Identical;
    first_pass(&mut model, &options);

    assert!(names(&model, animal).is_empty());
}

#[test]
fn disabled_by_option() {
    let Family {
        mut model,
        dog,
        cat,
        ..
    } = family();
    let a = model.primitive(PrimitiveKind::String);
    let b = model.primitive(PrimitiveKind::String);
    model.property(dog, "name", a).unwrap();
    model.property(cat, "name", b).unwrap();
    let before = model.clone();

    let mut options = BuildOptions::default();
    options.transform.elevate_properties = false;
    first_pass(&mut model, &options);

    assert_eq!(model, before);
}

#[test]
fn literals_become_abstract_without_literal_types() {
    let Family {
        mut model,
        animal,
        dog,
        cat,
    } = family();
    let woof = model.literal(PrimitiveKind::String, LiteralValue::String("dog".into()));
    let meow = model.literal(PrimitiveKind::String, LiteralValue::String("cat".into()));
    model.property(dog, "kind", woof).unwrap();
    model.property(cat, "kind", meow).unwrap();

    let mut with_literals = model.clone();
    second_pass(&mut with_literals, TargetFeatures::TYPESCRIPT);
    assert!(names(&with_literals, animal).is_empty());

    second_pass(&mut model, TargetFeatures::JAVA);
    let elevated = &model.get(animal).properties()[0];
    assert!(elevated.is_abstract);
    assert_eq!(model.describe(elevated.ty), "string");
    assert_eq!(names(&model, dog), vec!["kind"]);
    assert_eq!(names(&model, cat), vec!["kind"]);
}

#[test]
fn cascades_from_the_deepest_supertype() {
    let mut model = OmniModel::new("cascade");
    let base = model.object("Base");
    let left = model.object("Left");
    let right = model.object("Right");
    let x = model.object("X");
    let y = model.object("Y");
    model.extend(left, base).unwrap();
    model.extend(right, base).unwrap();
    model.extend(x, left).unwrap();
    model.extend(y, left).unwrap();
    for owner in [right, x, y] {
        let id = model.primitive(PrimitiveKind::String);
        model.property(owner, "id", id).unwrap();
    }
    model.export(right);
    model.export(x);
    model.export(y);

    first_pass(&mut model, &BuildOptions::default());

    assert_eq!(names(&model, base), vec!["id"]);
    assert!(names(&model, left).is_empty());
    assert!(names(&model, right).is_empty());
    assert!(names(&model, x).is_empty());
    model.validate().unwrap();
}

#[test]
fn existing_supertype_property_wins() {
    let Family {
        mut model,
        animal,
        dog,
        cat,
    } = family();
    let string = model.primitive(PrimitiveKind::String);
    model.property(animal, "name", string).unwrap();
    model.property(dog, "name", string).unwrap();
    model.property(cat, "name", string).unwrap();
    let before = model.clone();

    first_pass(&mut model, &BuildOptions::default());

    assert_eq!(model, before);
}

#[test]
fn single_subtype_is_left_alone() {
    let mut model = OmniModel::new("single");
    let animal = model.object("Animal");
    let dog = model.object("Dog");
    model.extend(dog, animal).unwrap();
    let name = model.primitive(PrimitiveKind::String);
    model.property(dog, "name", name).unwrap();
    model.export(dog);
    let before = model.clone();

    first_pass(&mut model, &BuildOptions::default());

    assert_eq!(model, before);
}
