//! End-to-end generation checked against a known-good Kotlin DSL script.

use std::path::PathBuf;

use scriptgen_core::builder::ScriptTreeBuilder;
use scriptgen_core::buildscript::{
    self, GradleBuildScriptBuilder, GroovyDslBuildScriptBuilder, KotlinDslBuildScriptBuilder,
};
use scriptgen_core::config::BuilderConfiguration;
use scriptgen_core::descriptor::ProjectDescriptor;
use scriptgen_core::render::{Dialect, GroovyScriptRenderer, KotlinScriptRenderer, ScriptRenderer};
use scriptgen_core::tree::{Expression, ScriptTree};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn expected_script() -> String {
    std::fs::read_to_string(fixture_path("build_after.gradle.kts")).unwrap()
}

/// plugins, application, repositories and dependencies, built statement by statement.
fn project_tree() -> ScriptTree {
    ScriptTreeBuilder::tree(|b| {
        b.block("plugins", |p| {
            p.code("application");
            p.expression(Expression::infix(
                Expression::call("kotlin", vec!["jvm".into()]),
                "version",
                "1.7.20-M1".into(),
            ));
        });
        b.new_line();
        b.block("application", |a| {
            a.assign("mainClassName", "samples.HelloWorld");
        });
        b.new_line();
        b.block("repositories", |r| {
            r.call("jcenter", vec![]);
        });
        b.new_line();
        b.block("dependencies", |d| {
            d.call("testCompile", vec!["junit:junit:4.12".into()]);
            d.call(
                "implementation",
                vec![Expression::call("kotlin", vec!["stdlib-jdk8".into()])],
            );
        });
    })
}

#[test]
fn tree_renders_project_section_of_fixture() {
    let rendered = KotlinScriptRenderer.render(&project_tree()).unwrap();

    // Everything between the imports and the postfix statements.
    let fixture = expected_script();
    let section: Vec<&str> = fixture.lines().skip(3).take(17).collect();
    assert_eq!(rendered.lines().collect::<Vec<_>>(), section);
}

#[test]
fn builder_reproduces_whole_fixture() {
    let mut builder = KotlinDslBuildScriptBuilder::create("4.10".parse().unwrap());
    builder.add_import("org.gradle.api.JavaVersion.VERSION_1_7");
    builder.with_application("samples.HelloWorld");
    builder.with_kotlin_jvm_plugin("1.7.20-M1");
    builder.with_jcenter();
    builder.add_dependency("testCompile", "junit:junit:4.12".into());
    let stdlib = builder.kotlin_dependency("stdlib-jdk8");
    builder.add_implementation_dependency(stdlib);
    builder.with_postfix(Box::new(|b: &mut ScriptTreeBuilder| {
        b.comment("VERSION: 1.7.20-M1-release-125");
    }));
    builder.with_kotlin_jvm_target("1.8");

    assert_eq!(builder.generate().unwrap(), expected_script());
}

#[test]
fn descriptor_reproduces_whole_fixture() {
    let descriptor = ProjectDescriptor::from_file(&fixture_path("simple_project.json")).unwrap();
    let config = BuilderConfiguration::new(
        Dialect::KotlinDsl,
        descriptor.gradle_version.clone().unwrap(),
    );
    let mut builder = buildscript::create(&config);
    descriptor.apply_to(builder.as_mut()).unwrap();

    assert_eq!(builder.generate().unwrap(), expected_script());
}

#[test]
fn test_task_block_is_appended_after_fixture_content() {
    let descriptor = ProjectDescriptor::from_file(&fixture_path("simple_project.json")).unwrap();
    let mut builder = KotlinDslBuildScriptBuilder::create("4.10".parse().unwrap());
    descriptor.apply_to(builder.as_mut()).unwrap();

    builder.configure_test_task(Box::new(|_: &mut ScriptTreeBuilder| {}));
    assert_eq!(builder.generate().unwrap(), expected_script());

    builder.configure_test_task(Box::new(|t: &mut ScriptTreeBuilder| {
        t.call("useJUnitPlatform", vec![]);
    }));
    let expected = format!("{}tasks.test {{\n    useJUnitPlatform()\n}}\n", expected_script());
    assert_eq!(builder.generate().unwrap(), expected);
}

#[test]
fn same_tree_renders_in_groovy() {
    let rendered = GroovyScriptRenderer.render(&project_tree()).unwrap();
    assert_eq!(
        rendered,
        "plugins {\n    application\n    kotlin('jvm') version '1.7.20-M1'\n}\n\n\
         application {\n    mainClassName = 'samples.HelloWorld'\n}\n\n\
         repositories {\n    jcenter()\n}\n\n\
         dependencies {\n    testCompile 'junit:junit:4.12'\n    implementation kotlin('stdlib-jdk8')\n}\n"
    );
}

#[test]
fn groovy_descriptor_output_keeps_section_order() {
    let descriptor = ProjectDescriptor::from_file(&fixture_path("simple_project.json")).unwrap();
    let mut builder = GroovyDslBuildScriptBuilder::create("4.10".parse().unwrap());
    descriptor.apply_to(builder.as_mut()).unwrap();
    let script = builder.generate().unwrap();

    let positions: Vec<usize> = [
        "import org.gradle.api.JavaVersion.VERSION_1_7",
        "plugins {",
        "application {",
        "repositories {",
        "dependencies {",
        "// VERSION: 1.7.20-M1-release-125",
        "compileKotlin {",
    ]
    .iter()
    .map(|needle| script.find(needle).unwrap())
    .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(script.contains("    id('org.jetbrains.kotlin.jvm') version '1.7.20-M1'\n"));
    assert!(script.contains("    implementation 'org.jetbrains.kotlin:kotlin-stdlib-jdk8'\n"));
}
