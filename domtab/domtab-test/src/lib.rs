// Copyright 2024 WHERE TRUE Technologies.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


use std::path::PathBuf;

use object_store::path::Path;

/// Returns the path of a fixture under the workspace `test-data/datasources` directory.
pub fn test_path(data_type: &str, file_name: &str) -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::current_dir().unwrap());

    let workspace_root = manifest_dir
        .ancestors()
        .find(|dir| dir.join("test-data").is_dir())
        .unwrap_or_else(|| panic!("no test-data directory above {:?}", manifest_dir))
        .to_path_buf();

    workspace_root
        .join("test-data")
        .join("datasources")
        .join(data_type)
        .join(file_name)
}

/// Get a fixture as an object store path. A helper function not for main use.
pub fn test_listing_table_dir(data_type: &str, file_name: &str) -> Path {
    let abs_file_path = test_path(data_type, file_name);
    Path::from_absolute_path(abs_file_path).unwrap()
}
