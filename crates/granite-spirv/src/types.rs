//! Operand enumerations shared by several instructions.
//!
//! Values outside the named set decode to `Other(raw)` rather than failing: whether a value is
//! acceptable is up to the consumer, not the decoder.

use core::fmt;

macro_rules! spirv_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident = $value:literal => $label:literal,)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($variant,)*
            Other(u32),
        }

        impl $name {
            pub fn from_raw(value: u32) -> Self {
                match value {
                    $($value => Self::$variant,)*
                    other => Self::Other(other),
                }
            }

            #[deny(unreachable_patterns)]
            pub fn raw(&self) -> u32 {
                match self {
                    $(Self::$variant => $value,)*
                    Self::Other(value) => *value,
                }
            }

            /// Returns `false` for values outside the named set.
            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Other(_))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($label),)*
                    Self::Other(value) => write!(f, "unknown ({value})"),
                }
            }
        }
    };
}

spirv_enum! {
    /// Shader stage an entry point runs in (`OpEntryPoint`).
    pub enum ExecutionModel {
        Vertex = 0 => "Vertex",
        TessellationControl = 1 => "Tessellation Control",
        TessellationEvaluation = 2 => "Tessellation Evaluation",
        Geometry = 3 => "Geometry",
        Fragment = 4 => "Fragment",
        GlCompute = 5 => "Compute",
        Kernel = 6 => "OpenCL Kernel",
        TaskNv = 5267 => "NV Task",
        MeshNv = 5268 => "NV Mesh",
        RayGenerationKhr = 5313 => "KHR Ray Generation",
        IntersectionKhr = 5314 => "KHR Intersection",
        AnyHitKhr = 5315 => "KHR Any Hit",
        ClosestHitKhr = 5316 => "KHR Closest Hit",
        MissKhr = 5317 => "KHR Miss",
        CallableKhr = 5318 => "KHR Callable",
    }
}

spirv_enum! {
    /// First operand of `OpMemoryModel`.
    pub enum AddressingModel {
        Logical = 0 => "Logical",
        Physical32 = 1 => "32 Bit Physical",
        Physical64 = 2 => "64 Bit Physical",
        PhysicalStorageBuffer64 = 5348 => "Physical Storage Buffer 64 Bit",
    }
}

spirv_enum! {
    /// Second operand of `OpMemoryModel`.
    pub enum MemoryModel {
        Simple = 0 => "Simple",
        Glsl450 = 1 => "GLSL 4.50",
        OpenCl = 2 => "OpenCL",
        Vulkan = 3 => "Vulkan",
    }
}

spirv_enum! {
    pub enum SourceLanguage {
        Unspecified = 0 => "Unknown",
        Essl = 1 => "ESSL (OpenGL ES Shading Language)",
        Glsl = 2 => "GLSL (OpenGL Shading Language)",
        OpenClC = 3 => "C (OpenCL Kernel)",
        OpenClCpp = 4 => "C++ (OpenCL Kernel)",
        Hlsl = 5 => "HLSL (High Level Shader Language)",
    }
}

spirv_enum! {
    /// Storage class of an `OpTypePointer`.
    pub enum StorageClass {
        UniformConstant = 0 => "UniformConstant",
        Input = 1 => "Input",
        Uniform = 2 => "Uniform",
        Output = 3 => "Output",
        Workgroup = 4 => "Workgroup",
        CrossWorkgroup = 5 => "CrossWorkgroup",
        Private = 6 => "Private",
        Function = 7 => "Function",
        Generic = 8 => "Generic",
        PushConstant = 9 => "PushConstant",
        AtomicCounter = 10 => "AtomicCounter",
        Image = 11 => "Image",
        StorageBuffer = 12 => "StorageBuffer",
    }
}

spirv_enum! {
    /// Mode declared for an entry point by `OpExecutionMode`.
    pub enum ExecutionMode {
        Invocations = 0 => "Invocations",
        SpacingEqual = 1 => "SpacingEqual",
        SpacingFractionalEven = 2 => "SpacingFractionalEven",
        SpacingFractionalOdd = 3 => "SpacingFractionalOdd",
        VertexOrderCw = 4 => "VertexOrderCw",
        VertexOrderCcw = 5 => "VertexOrderCcw",
        PixelCenterInteger = 6 => "PixelCenterInteger",
        OriginUpperLeft = 7 => "OriginUpperLeft",
        OriginLowerLeft = 8 => "OriginLowerLeft",
        EarlyFragmentTests = 9 => "EarlyFragmentTests",
        PointMode = 10 => "PointMode",
        Xfb = 11 => "Xfb",
        DepthReplacing = 12 => "DepthReplacing",
        DepthGreater = 14 => "DepthGreater",
        DepthLess = 15 => "DepthLess",
        DepthUnchanged = 16 => "DepthUnchanged",
        LocalSize = 17 => "LocalSize",
        LocalSizeHint = 18 => "LocalSizeHint",
    }
}

spirv_enum! {
    /// Capability declared by `OpCapability`.
    pub enum Capability {
        Matrix = 0 => "Matrix",
        Shader = 1 => "Shader",
        Geometry = 2 => "Geometry",
        Tessellation = 3 => "Tessellation",
        Addresses = 4 => "Addresses",
        Linkage = 5 => "Linkage",
        Kernel = 6 => "Kernel",
        Float16 = 9 => "Float16",
        Float64 = 10 => "Float64",
        Int64 = 11 => "Int64",
        Int16 = 22 => "Int16",
        ClipDistance = 32 => "ClipDistance",
        CullDistance = 33 => "CullDistance",
        Int8 = 39 => "Int8",
        InputAttachment = 40 => "InputAttachment",
        ImageQuery = 50 => "ImageQuery",
        DerivativeControl = 51 => "DerivativeControl",
        MultiViewport = 57 => "MultiViewport",
    }
}

spirv_enum! {
    /// Decoration kind applied by `OpDecorate` / `OpMemberDecorate`.
    pub enum Decoration {
        RelaxedPrecision = 0 => "RelaxedPrecision",
        SpecId = 1 => "SpecId",
        Block = 2 => "Block",
        BufferBlock = 3 => "BufferBlock",
        RowMajor = 4 => "RowMajor",
        ColMajor = 5 => "ColMajor",
        ArrayStride = 6 => "ArrayStride",
        MatrixStride = 7 => "MatrixStride",
        GlslShared = 8 => "GLSLShared",
        GlslPacked = 9 => "GLSLPacked",
        CPacked = 10 => "CPacked",
        BuiltIn = 11 => "BuiltIn",
        NoPerspective = 13 => "NoPerspective",
        Flat = 14 => "Flat",
        Patch = 15 => "Patch",
        Centroid = 16 => "Centroid",
        Sample = 17 => "Sample",
        Invariant = 18 => "Invariant",
        Restrict = 19 => "Restrict",
        Aliased = 20 => "Aliased",
        Volatile = 21 => "Volatile",
        Constant = 22 => "Constant",
        Coherent = 23 => "Coherent",
        NonWritable = 24 => "NonWritable",
        NonReadable = 25 => "NonReadable",
        Uniform = 26 => "Uniform",
        UniformId = 27 => "UniformId",
        SaturatedConversion = 28 => "SaturatedConversion",
        Stream = 29 => "Stream",
        Location = 30 => "Location",
        Component = 31 => "Component",
        Index = 32 => "Index",
        Binding = 33 => "Binding",
        DescriptorSet = 34 => "DescriptorSet",
        Offset = 35 => "Offset",
        XfbBuffer = 36 => "XfbBuffer",
        XfbStride = 37 => "XfbStride",
        FuncParamAttr = 38 => "FuncParamAttr",
        FpRoundingMode = 39 => "FPRoundingMode",
        FpFastMathMode = 40 => "FPFastMathMode",
        LinkageAttributes = 41 => "LinkageAttributes",
        NoContraction = 42 => "NoContraction",
        InputAttachmentIndex = 43 => "InputAttachmentIndex",
        Alignment = 44 => "Alignment",
        MaxByteOffset = 45 => "MaxByteOffset",
        AlignmentId = 46 => "AlignmentId",
        MaxByteOffsetId = 47 => "MaxByteOffsetId",
        SecondaryViewportRelativeNv = 5256 => "SecondaryViewportRelativeNV",
        CounterBuffer = 5634 => "CounterBuffer",
        UserSemantic = 5635 => "UserSemantic",
        UserTypeGoogle = 5636 => "UserTypeGOOGLE",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_values_are_preserved() {
        let model = ExecutionModel::from_raw(77);
        assert_eq!(model, ExecutionModel::Other(77));
        assert_eq!(model.raw(), 77);
        assert!(!model.is_known());
        assert_eq!(model.to_string(), "unknown (77)");
    }

    #[test]
    fn labels_match_diagnostic_names() {
        assert_eq!(MemoryModel::Glsl450.to_string(), "GLSL 4.50");
        assert_eq!(AddressingModel::from_raw(5348).to_string(), "Physical Storage Buffer 64 Bit");
        assert_eq!(ExecutionModel::from_raw(5).to_string(), "Compute");
    }
}
