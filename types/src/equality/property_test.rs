use crate::{
    CommonType, EqualityLevel, OmniModel, OmniProperty, PrimitiveKind, PropertyDiffKind,
    TargetFeatures, TypeDiffKind, TypeDiffer,
};
use alloc::string::String;
use alloc::vec;
use pretty_assertions::assert_eq;

#[test]
fn property_diffs_cover_name_type_and_metadata() {
    let mut model = OmniModel::new("m");
    let owner = model.object("Owner");
    let int = model.primitive(PrimitiveKind::Integer);
    let long = model.primitive(PrimitiveKind::Long);
    let differ = TypeDiffer::new(&model, TargetFeatures::GENERIC);

    let a = OmniProperty::new("count", int, owner).required(true);
    let b = OmniProperty::new("count", long, owner).with_description("how many");
    let equality = differ.diff_property(&a, &b);

    assert_eq!(
        equality.property_diffs,
        vec![
            PropertyDiffKind::Type,
            PropertyDiffKind::Required,
            PropertyDiffKind::Meta
        ]
    );
    assert_eq!(
        equality.type_diffs,
        vec![TypeDiffKind::IsomorphicType, TypeDiffKind::Size]
    );
    assert_eq!(equality.common, Some(CommonType::Existing(long)));
    assert_eq!(
        EqualityLevel::of(&equality.type_diffs, &equality.property_diffs),
        EqualityLevel::IsomorphicMin
    );

    let renamed = OmniProperty::new("total", int, owner);
    let equality = differ.diff_property(&a, &renamed);
    assert_eq!(equality.property_diffs[0], PropertyDiffKind::Name);
}

fn family(model: &mut OmniModel) -> (crate::TypeId, crate::TypeId, crate::TypeId) {
    let string = model.primitive(PrimitiveKind::String);
    let int = model.primitive(PrimitiveKind::Integer);
    let double = model.primitive(PrimitiveKind::Double);

    let cat = model.object("Cat");
    model.property(cat, "name", string).unwrap();
    model.property(cat, "age", int).unwrap();
    model.property(cat, "lives", int).unwrap();

    let dog = model.object("Dog");
    model.property(dog, "age", double).unwrap();
    model.property(dog, "name", string).unwrap();

    let fish = model.object("Fish");
    model.property(fish, "name", string).unwrap();
    model.property(fish, "age", int).unwrap();
    (cat, dog, fish)
}

#[test]
fn common_properties_keep_first_sibling_order() {
    let mut model = OmniModel::new("m");
    let (cat, dog, fish) = family(&mut model);
    let differ = TypeDiffer::new(&model, TargetFeatures::GENERIC);

    let common = differ.common_properties(&[cat, dog, fish], &[], &[]);
    let names: vec::Vec<&str> = common.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["name", "age"]);

    let name = &common[0];
    assert!(name.type_diffs.is_empty());
    assert_eq!(name.locations, vec![(cat, 0), (dog, 1), (fish, 0)]);
    assert_eq!(name.distinct_types.len(), 1);

    let age = &common[1];
    assert_eq!(age.distinct_types.len(), 2);
    assert!(age.type_diffs.contains(&TypeDiffKind::IsomorphicType));
    assert_eq!(
        age.common.as_ref().and_then(CommonType::existing),
        Some(model.get_object(dog).unwrap().properties[0].ty)
    );
}

#[test]
fn banned_diffs_exclude_properties() {
    let mut model = OmniModel::new("m");
    let (cat, dog, fish) = family(&mut model);
    let differ = TypeDiffer::new(&model, TargetFeatures::GENERIC);

    let common = differ.common_properties(
        &[cat, dog, fish],
        &[TypeDiffKind::FundamentalType, TypeDiffKind::IsomorphicType],
        &[],
    );
    assert_eq!(common.len(), 1);
    assert_eq!(common[0].name, String::from("name"));

    // Signature implies type, so banning it removes `age` as well.
    let common = differ.common_properties(&[cat, dog], &[], &[PropertyDiffKind::Signature]);
    assert_eq!(common.len(), 1);
}

#[test]
fn common_properties_of_nothing_is_empty() {
    let model = OmniModel::new("m");
    let differ = TypeDiffer::new(&model, TargetFeatures::GENERIC);
    assert!(differ.common_properties(&[], &[], &[]).is_empty());
}
