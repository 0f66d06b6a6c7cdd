/// Text whose presence in the first lines marks a licensed file
pub const LICENSE_MARKER: &str = "GNU Lesser General Public License";

/// Closing token of the leading comment block replaced by a new license
pub const HEADER_TERMINATOR: &str = "***********/";

/// Number of leading lines searched for [`LICENSE_MARKER`]
pub const LICENSE_SEARCH_LINES: usize = 40;

pub const LICENSE_TEMPLATE: &str = r#"
/**
 *
 *  Copyright 2005-2024 Pierre-Henri WUILLEMIN (@LIP6) and Christophe GONZALES (@AMU)
 *   {prenom.nom}_at_lip6.fr
 *
 *  This library is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU Lesser General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This library is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU Lesser General Public License for more details.
 *
 *  You should have received a copy of the GNU Lesser General Public License
 *  along with this library.  If not, see <http://www.gnu.org/licenses/>.
 *
 */

"#;

const CPP_BODY: &str = r#"

/**
 * @file
 * @brief Class to include at least once this header
 *
 * @author Pierre-Henri WUILLEMIN (@LIP6) and Christophe GONZALES (@AMU)
 */

#include <{include_file}>

"#;

/// Translation unit that only includes `include_file`
pub fn cpp_for_header(include_file: &str) -> String {
    format!(
        "{}{}",
        LICENSE_TEMPLATE,
        CPP_BODY.replace("{include_file}", include_file)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_cpp_is_licensed_and_includes_header() {
        let cpp = cpp_for_header("agrum/base/core/foo.h");
        assert!(cpp.contains("#include <agrum/base/core/foo.h>"));
        let head: Vec<&str> = cpp.lines().take(LICENSE_SEARCH_LINES).collect();
        assert!(head.join("\n").contains(LICENSE_MARKER));
    }
}
