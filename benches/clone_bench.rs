//! Criterion benchmarks for the planning-clone engine.
//!
//! Uses synthetic solution graphs (visit chains over a shared pool of
//! immutable locations) to measure pure cloning overhead independent
//! of any domain.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use u_planner::cloner::{PlanningCloner, SolutionCloner};
use u_planner::domain::{
    ClassDef, ClassId, CollectionKind, DeclaredType, DomainModel, FieldDef, PropertyAccessor,
    SolutionDescriptor, Value,
};

struct Domain {
    model: Arc<DomainModel>,
    cloner: PlanningCloner,
    location: ClassId,
    visit: ClassId,
    plan: ClassId,
}

fn build_domain() -> Domain {
    let mut model = DomainModel::new();
    let location = model.add_class(
        ClassDef::new("Location")
            .as_immutable()
            .with_field(FieldDef::new("name", DeclaredType::Text)),
    );
    let visit = model.declare_class("Visit");
    model.define_class(
        visit,
        ClassDef::new("Visit")
            .with_field(FieldDef::new("code", DeclaredType::Text))
            .with_field(FieldDef::new("demand", DeclaredType::Int))
            .with_field(FieldDef::new("location", DeclaredType::object(location)))
            .with_field(FieldDef::new("next", DeclaredType::object(visit))),
    );
    let plan = model.add_class(
        ClassDef::new("RoutePlan")
            .with_field(FieldDef::new(
                "visit_list",
                DeclaredType::list(DeclaredType::object(visit)),
            ))
            .with_field(FieldDef::new(
                "location_list",
                DeclaredType::list(DeclaredType::object(location)),
            )),
    );
    let model = Arc::new(model);

    let mut descriptor = SolutionDescriptor::new(model.clone(), plan);
    descriptor.add_entity_class(visit);
    descriptor.add_entity_collection_property(PropertyAccessor::new("visit_list"));

    Domain {
        cloner: PlanningCloner::new(Arc::new(descriptor)),
        model,
        location,
        visit,
        plan,
    }
}

fn build_solution(domain: &Domain, visits: usize, rng: &mut StdRng) -> u_planner::domain::ObjRef {
    let model = &domain.model;
    let locations: Vec<Value> = (0..10)
        .map(|i| {
            let location = model.instantiate(domain.location);
            model
                .set_field(&location, "name", Value::from(format!("loc{i}").as_str()))
                .unwrap();
            Value::Object(location)
        })
        .collect();

    let visit_refs: Vec<_> = (0..visits)
        .map(|i| {
            let visit = model.instantiate(domain.visit);
            model
                .set_field(&visit, "code", Value::from(format!("v{i}").as_str()))
                .unwrap();
            model
                .set_field(&visit, "demand", Value::Int(rng.random_range(1..100)))
                .unwrap();
            model
                .set_field(
                    &visit,
                    "location",
                    locations[rng.random_range(0..locations.len())].clone(),
                )
                .unwrap();
            visit
        })
        .collect();
    for pair in visit_refs.windows(2) {
        model
            .set_field(&pair[0], "next", Value::Object(pair[1].clone()))
            .unwrap();
    }

    let solution = model.instantiate(domain.plan);
    model
        .set_field(
            &solution,
            "visit_list",
            Value::Collection(model.new_collection(
                CollectionKind::ArrayList,
                visit_refs.into_iter().map(Value::Object).collect(),
            )),
        )
        .unwrap();
    model
        .set_field(
            &solution,
            "location_list",
            Value::Collection(model.new_collection(CollectionKind::ArrayList, locations)),
        )
        .unwrap();
    solution
}

fn bench_clone_solution(c: &mut Criterion) {
    let domain = build_domain();
    let mut rng = StdRng::seed_from_u64(42);

    let mut group = c.benchmark_group("clone_solution");
    for &size in &[10usize, 100, 1000] {
        let solution = build_solution(&domain, size, &mut rng);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| domain.cloner.clone_solution(black_box(&solution)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_clone_solution);
criterion_main!(benches);
