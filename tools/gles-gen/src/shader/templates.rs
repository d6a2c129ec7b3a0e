//! Built-in templates for the generated shader-binding sources

/// shaders.h
pub const HEADER: &str = r#"// Auto generated DO NOT edit.

#ifndef $Guard
#define $Guard

#include <GLES2/gl2.h>

#include "base/basictypes.h"
#include "$BaseInclude"

namespace $Namespace {

$Headers

}  // namespace $Namespace

#endif  // $Guard
"#;

/// shaders.cc
pub const IMPLEMENTATION: &str = r#"// Auto generated DO NOT edit.

#include "$HeaderInclude"

#include <GLES2/gl2.h>

#include "base/logging.h"

#include "$BaseInclude"

namespace $Namespace {

$Sources

$Implementations

}  // namespace $Namespace
"#;

/// Class declaration for one program.
pub const PROGRAM_CLASS: &str = r#"class $ShaderName : public Shader {
 public:
  $ShaderName();

$Accessors

 private:
$Slots

  DISALLOW_COPY_AND_ASSIGN($ShaderName);
};"#;

/// Constructor for one program.
pub const PROGRAM_CTOR: &str = r#"$ShaderName::$ShaderName()
    : Shader($VertexSource, $FragmentSource) {
$FetchSlots
}"#;
