//! # scriptgen-core
//!
//! Generation of Gradle build scripts in Kotlin DSL and Groovy DSL.
//!
//! Scripts are described as a dialect-neutral statement tree and serialized
//! by one renderer per dialect. On top of that sits a Gradle-aware builder
//! that knows about plugins, repositories, dependency scopes and test-task
//! configuration, and adapts them to the targeted Gradle version.
//!
//! ## Modules
//!
//! - [`tree`] - Statement and expression nodes of a script
//! - [`builder`] - Fluent [`ScriptTreeBuilder`](builder::ScriptTreeBuilder)
//! - [`render`] - Dialect renderers turning trees into source text
//! - [`buildscript`] - Gradle build-script builders and their factory
//! - [`version`] - Gradle version values
//! - [`config`] - Builder configuration and persisted defaults
//! - [`descriptor`] - JSON project descriptors
//!
//! ## Example
//!
//! ```
//! use scriptgen_core::buildscript::{self, GradleBuildScriptBuilder};
//! use scriptgen_core::config::BuilderConfiguration;
//! use scriptgen_core::render::Dialect;
//!
//! let config = BuilderConfiguration::new(Dialect::GroovyDsl, "8.5".parse().unwrap());
//! let mut builder = buildscript::create(&config);
//! builder.with_java_plugin();
//! builder.with_maven_central();
//! builder.with_junit5().unwrap();
//!
//! let script = builder.generate().unwrap();
//! assert!(script.contains("testImplementation 'org.junit.jupiter:junit-jupiter-api:5.10.0'"));
//! assert!(script.ends_with("test {\n    useJUnitPlatform()\n}\n"));
//! ```

pub mod builder;
pub mod buildscript;
pub mod config;
pub mod descriptor;
pub mod render;
pub mod tree;
pub mod version;
