/// Starter manifest written by `shipkit init`.
///
/// The manifest is expected to live one directory below the project root
/// (for example in `scripts/`), which is why `root` is `{manifest_dir}/..`.
pub const MANIFEST_TEMPLATE: &str = r#"# shipkit manifest
#
# Templates use {name} placeholders. Each variable may reference built-ins
# ({manifest_dir}), profile arguments, and variables declared before it.
# Write {{ and }} for literal braces.

variables = [
  { name = "root", value = "{manifest_dir}/.." },
  { name = "dependencies", value = "{root}/dependencies" },
  { name = "workspace", value = "{root}/workspace" },
]

# shipkit package application <architecture> <configuration> <vs_crt_path> <project_name>
[profiles.application]
title = "Packaging {project_name}"
arguments = ["architecture", "configuration", "vs_crt_path", "project_name"]
variables = [
  { name = "dll_dir", value = "{dependencies}/runtime/{architecture}" },
  { name = "output", value = "{workspace}/build" },
  { name = "vs_build_output", value = "{root}/project/{architecture}/{configuration}" },
  { name = "delta", value = "{dependencies}/delta" },
]
clean = ["{output}"]
create = ["{output}"]
resources = [
  { name = "assets", source = "{root}/assets", target = "{output}/assets" },
  { name = "fonts", source = "{delta}/engines/basic/fonts", target = "{output}/delta/fonts" },
  { name = "shaders", source = "{delta}/engines/basic/shaders", target = "{output}/delta/shaders" },
  { name = "runtime dependencies", source = "{dll_dir}", target = "{output}", kind = "dlls" },
  { name = "binaries", source = "{vs_build_output}/{project_name}.exe", target = "{output}", kind = "file" },
  { name = "configuration", source = "{root}/configuration/delta.conf", target = "{output}", kind = "file" },
  { name = "visual studio redist", source = "{vs_crt_path}", target = "{output}", kind = "dlls" },
]

# shipkit package delta <project_name>
[profiles.delta]
title = "Fetching local delta build"
arguments = ["project_name"]
variables = [
  { name = "submodules", value = "{dependencies}/submodules" },
  { name = "delta_build", value = "{submodules}/delta-studio/workspace/build/delta" },
]
resources = [
  { name = "delta_build", source = "{delta_build}", target = "{dependencies}/delta", optional = true },
]

# shipkit package dlls <architecture> <configuration>
[profiles.dlls]
title = "Copy Runtime DLLs"
arguments = ["architecture", "configuration"]
resources = [
  { name = "runtime dependencies", source = "{dependencies}/runtime/{architecture}", target = "{root}/project/{architecture}/{configuration}", kind = "dlls" },
]

# shipkit track
[tracker]
root = "{root}"
tracking_dir = "{workspace}/tracking"
directories = ["src", "test", "include", "scripts", "demos", "utilities"]
extensions = [".h", ".cpp", ".py"]
ignore = ["sqlite3ext.h", "sqlite3.h", "shell.c", "sqlite3.c"]
banner = ["Build Information", "Generated by shipkit"]
"#;
