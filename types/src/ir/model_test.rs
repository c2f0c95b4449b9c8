use crate::{CompositionKind, OmniEndpoint, OmniInput, OmniModel, OmniOutput, OmniType, PrimitiveKind};
use alloc::string::String;
use alloc::vec;

#[test]
fn swap_type_rewrites_every_edge_except_target() {
    let mut model = OmniModel::new("m");
    let a = model.object("A");
    let holder = model.object("Holder");
    model.property(holder, "a", a).unwrap();
    let list = model.array(a);
    let sub = model.object("Sub");
    model.extend(sub, a).unwrap();
    model.export(a);
    model.export(holder);
    model.export(list);
    model.endpoints.push(OmniEndpoint {
        name: String::from("get"),
        path: String::from("/a"),
        request: OmniInput { ty: Some(a) },
        responses: vec![OmniOutput {
            name: String::from("ok"),
            ty: a,
            error: false,
        }],
    });

    let source = model.generic_source(a, vec![]);
    let swapped = model.swap_type(a, source);

    assert_eq!(swapped, 6);
    assert_eq!(model.types[0], source);
    assert_eq!(model.get_object(holder).unwrap().properties[0].ty, source);
    assert_eq!(model.children(list), vec![source]);
    assert_eq!(model.get_object(sub).unwrap().extended_by, Some(source));
    assert_eq!(model.endpoints[0].request.ty, Some(source));
    assert_eq!(model.endpoints[0].responses[0].ty, source);
    assert!(matches!(model.get(source), OmniType::GenericSource { of, .. } if *of == a));
}

#[test]
fn replace_type_rewrites_the_target_too() {
    let mut model = OmniModel::new("m");
    let animal = model.object("Animal");
    let dog = model.object("Dog");
    let both = model.composition(CompositionKind::And, vec![animal, dog], None);
    model.property(dog, "friend", both).unwrap();
    let owner = model.object("Owner");
    model.property(owner, "pet", both).unwrap();

    let replaced = model.replace_type(both, dog);

    assert_eq!(replaced, 2);
    assert_eq!(model.get_object(dog).unwrap().properties[0].ty, dog);
    assert_eq!(model.get_object(owner).unwrap().properties[0].ty, dog);
}

#[test]
fn supertypes_follow_compositions_nearest_first() {
    let mut model = OmniModel::new("m");
    let base = model.object("Base");
    let left = model.object("Left");
    let right = model.object("Right");
    model.extend(left, base).unwrap();
    let and = model.composition(CompositionKind::And, vec![left, right], None);
    let leaf = model.object("Leaf");
    model.extend(leaf, and).unwrap();

    assert_eq!(model.supertypes(leaf), vec![and, left, right, base]);
    assert_eq!(model.depth(leaf), 1);
    assert_eq!(model.depth(left), 1);
    assert_eq!(model.direct_subtypes(base), vec![left]);
}

#[test]
fn property_requires_object_owner() {
    let mut model = OmniModel::new("m");
    let int = model.primitive(PrimitiveKind::Integer);
    assert!(model.property(int, "x", int).is_err());

    let point = model.object("Point");
    model.property(point, "x", int).unwrap().required = true;
    let property = &model.get_object(point).unwrap().properties[0];
    assert_eq!(property.owner, point);
    assert!(property.required);
}

#[test]
fn unwrap_type_skips_wrappers() {
    let mut model = OmniModel::new("m");
    let pet = model.object("Pet");
    let documented = model.decorating(pet, Some(String::from("a pet")));
    let twice = model.decorating(documented, None);
    assert_eq!(model.unwrap_type(twice), pet);
    assert_eq!(model.unwrap_type(pet), pet);
}
