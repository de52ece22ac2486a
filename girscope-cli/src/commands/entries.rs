use std::path::Path;

use serde::Serialize;

use crate::{
    app::GlobalOptions,
    commands::common::load_typelib,
    output::{print_output, render, table},
};

#[derive(Debug, Serialize)]
struct EntryInfo {
    index: u16,
    kind: String,
    name: String,
    local: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<String>,
}

#[derive(Debug, Serialize)]
struct EntriesOutput {
    namespace: String,
    entries: Vec<EntryInfo>,
}

pub fn run(
    path: &Path,
    kind: Option<&str>,
    local_only: bool,
    opts: &GlobalOptions,
) -> anyhow::Result<()> {
    let typelib = load_typelib(path)?;

    let mut entries = Vec::new();
    for entry in typelib.entries() {
        let kind_name = entry
            .kind()
            .map_or_else(|| format!("#{}", entry.blob_type), |blob_type| blob_type.to_string());

        if local_only && !entry.local {
            continue;
        }
        if kind.is_some_and(|wanted| !kind_name.eq_ignore_ascii_case(wanted)) {
            continue;
        }

        entries.push(EntryInfo {
            index: entry.index,
            kind: kind_name,
            name: typelib.entry_name(&entry)?.to_string(),
            local: entry.local,
            offset: entry.local.then(|| format!("0x{:08X}", entry.offset)),
            namespace: typelib.entry_namespace(&entry)?.map(str::to_string),
        });
    }

    let output = EntriesOutput {
        namespace: typelib.namespace()?.to_string(),
        entries,
    };

    print_output(&output, opts, |output| {
        println!("{} ({} entries)\n", output.namespace, output.entries.len());

        let mut rows = table(&["#", "Kind", "Name", "Location"], &[0]);
        for entry in &output.entries {
            let location = match (&entry.offset, &entry.namespace) {
                (Some(offset), _) => offset.clone(),
                (None, Some(namespace)) => format!("from {namespace}"),
                (None, None) => String::new(),
            };
            rows.add_row(vec![
                entry.index.to_string(),
                entry.kind.clone(),
                entry.name.clone(),
                location,
            ]);
        }
        println!("{}", render(&rows));
    })
}
