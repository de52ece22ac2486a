use std::path::Path;

use girscope::BlobType;
use serde::Serialize;

use crate::{
    app::GlobalOptions,
    commands::common::load_typelib,
    output::{fields, print_output, render},
};

#[derive(Debug, Serialize)]
pub struct TypelibInfo {
    pub namespace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_library: Option<String>,
    pub format: String,
    pub size: u32,
    pub entry_count: u16,
    pub local_entry_count: u16,
    pub function_count: usize,
    pub object_count: usize,
    pub interface_count: usize,
    pub annotation_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probe_symbol: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
}

pub fn run(path: &Path, opts: &GlobalOptions) -> anyhow::Result<()> {
    let typelib = load_typelib(path)?;
    let header = typelib.header();

    let count_local = |kind: BlobType| {
        typelib
            .entries()
            .filter(|entry| entry.local && entry.kind() == Some(kind))
            .count()
    };

    let info = TypelibInfo {
        namespace: typelib.namespace()?.to_string(),
        version: typelib.nsversion()?.map(str::to_string),
        shared_library: typelib.shared_library()?.map(str::to_string),
        format: format!("{}.{}", header.major_version, header.minor_version),
        size: header.size,
        entry_count: header.n_entries,
        local_entry_count: header.n_local_entries,
        function_count: count_local(BlobType::Function),
        object_count: count_local(BlobType::Object),
        interface_count: count_local(BlobType::Interface),
        annotation_count: header.n_annotations,
        probe_symbol: typelib.find_some_symbol().map(str::to_string),
        dependencies: typelib
            .dependency_list()?
            .into_iter()
            .map(str::to_string)
            .collect(),
    };

    print_output(&info, opts, |info| {
        let block = fields(&[
            ("Namespace", Some(info.namespace.clone())),
            ("Version", info.version.clone()),
            ("Shared library", info.shared_library.clone()),
            ("Format", Some(info.format.clone())),
            ("Size", Some(format!("{} bytes", info.size))),
            (
                "Entries",
                Some(format!(
                    "{} ({} local)",
                    info.entry_count, info.local_entry_count
                )),
            ),
            ("Functions", Some(info.function_count.to_string())),
            ("Objects", Some(info.object_count.to_string())),
            ("Interfaces", Some(info.interface_count.to_string())),
            ("Annotations", Some(info.annotation_count.to_string())),
            ("Probe symbol", info.probe_symbol.clone()),
        ]);
        println!("{}", render(&block));

        if !info.dependencies.is_empty() {
            println!("\nDependencies:");
            for dependency in &info.dependencies {
                println!("  {dependency}");
            }
        }
    })
}
